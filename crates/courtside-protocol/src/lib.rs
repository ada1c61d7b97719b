//! Wire types for the Courtside client.
//!
//! This crate defines the records exchanged with the athletics backend:
//!
//! - **Resources** ([`Team`], [`Player`], [`Game`], [`StaffMember`]):
//!   what the backend returns from its public and admin endpoints.
//! - **Inputs** ([`TeamInput`], [`PlayerInput`], [`GameInput`],
//!   [`StaffMemberInput`]): request bodies for create/update calls.
//! - **Auth** ([`LoginRequest`], [`AuthResponse`]): the login exchange.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those records are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! The backend owns these shapes. The client only transports and
//! displays them, so there are no invariants here beyond which fields
//! may be `null`.
//!
//! ```text
//! Transport (bytes) → Protocol (DTOs) → API surface (typed calls)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    AuthResponse, Game, GameId, GameInput, HomeAway, LoginRequest,
    PhotoUpload, Player, PlayerId, PlayerInput, StaffId, StaffMember,
    StaffMemberInput, Team, TeamId, TeamInput, TeamLevel,
};
