use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use courtside::prelude::*;
use courtside::{DEFAULT_RECENT_LIMIT, DEFAULT_UPCOMING_LIMIT};
use tracing_subscriber::{fmt, EnvFilter};

/// Session file used when `COURTSIDE_SESSION_FILE` is unset.
const DEFAULT_SESSION_FILE: &str = ".courtside-session.json";

const USAGE: &str = "\
usage: courtside-admin <command> [args]

session:
  login <email> <password>     log in and remember the session
  logout                       forget the session
  whoami                       show who is logged in

public:
  teams                        list teams
  roster <teamId>              list a team's players
  schedule                     full game schedule
  upcoming [n]                 next n games (default 3)
  recent [n]                   last n games (default 5)
  staff [REGIONAL|NATIONAL]    list coaching staff

admin (login required):
  admin-teams                  list teams
  create-team <name> <level>   create a team
  delete-team <id>             delete a team
  admin-games                  list all games
  admin-staff                  list all staff, inactive included
  admin-roster <teamId>        list a team's players

environment:
  COURTSIDE_API_BASE_URL, COURTSIDE_TIMEOUT_SECS,
  COURTSIDE_SESSION_FILE, COURTSIDE_SESSION_KEY, RUST_LOG";

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Login { email: String, password: String },
    Logout,
    Whoami,
    Teams,
    Roster(TeamId),
    Schedule,
    Upcoming(u32),
    Recent(u32),
    Staff(Option<TeamLevel>),
    AdminTeams,
    CreateTeam { name: String, level: TeamLevel },
    DeleteTeam(TeamId),
    AdminGames,
    AdminStaff,
    AdminRoster(TeamId),
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let Some((name, rest)) = args.split_first() else {
            bail!("missing command");
        };
        let rest: Vec<&str> = rest.iter().map(String::as_str).collect();

        let command = match (name.as_str(), rest.as_slice()) {
            ("login", [email, password]) => Self::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("logout", []) => Self::Logout,
            ("whoami", []) => Self::Whoami,
            ("teams", []) => Self::Teams,
            ("roster", [team]) => Self::Roster(parse_id(team).map(TeamId)?),
            ("schedule", []) => Self::Schedule,
            ("upcoming", []) => Self::Upcoming(DEFAULT_UPCOMING_LIMIT),
            ("upcoming", [n]) => Self::Upcoming(parse_limit(n)?),
            ("recent", []) => Self::Recent(DEFAULT_RECENT_LIMIT),
            ("recent", [n]) => Self::Recent(parse_limit(n)?),
            ("staff", []) => Self::Staff(None),
            ("staff", [level]) => Self::Staff(Some(parse_level(level)?)),
            ("admin-teams", []) => Self::AdminTeams,
            ("create-team", [name, level]) => Self::CreateTeam {
                name: name.to_string(),
                level: parse_level(level)?,
            },
            ("delete-team", [id]) => Self::DeleteTeam(parse_id(id).map(TeamId)?),
            ("admin-games", []) => Self::AdminGames,
            ("admin-staff", []) => Self::AdminStaff,
            ("admin-roster", [team]) => {
                Self::AdminRoster(parse_id(team).map(TeamId)?)
            }
            (other, _) => bail!("unknown command or wrong arguments: {other}"),
        };
        Ok(command)
    }
}

fn parse_id(raw: &str) -> anyhow::Result<u64> {
    raw.parse().with_context(|| format!("not a valid id: {raw:?}"))
}

fn parse_limit(raw: &str) -> anyhow::Result<u32> {
    let n: u32 = raw
        .parse()
        .with_context(|| format!("not a valid count: {raw:?}"))?;
    if n == 0 {
        bail!("count must be at least 1");
    }
    Ok(n)
}

fn parse_level(raw: &str) -> anyhow::Result<TeamLevel> {
    raw.parse::<TeamLevel>().map_err(anyhow::Error::msg)
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn print_teams(teams: &[Team]) {
    if teams.is_empty() {
        println!("no teams");
    }
    for team in teams {
        println!(
            "{:>4}  {:<24} {:<9} {}",
            team.id,
            team.name,
            team.level.as_str(),
            team.season.as_deref().unwrap_or("")
        );
    }
}

fn print_players(players: &[Player]) {
    if players.is_empty() {
        println!("no players");
    }
    for player in players {
        let number = player
            .jersey_number
            .map(|n| format!("#{n}"))
            .unwrap_or_default();
        println!(
            "{:>4}  {:<4} {:<28} {}",
            player.id,
            number,
            player.full_name(),
            player.position.as_deref().unwrap_or("")
        );
    }
}

fn print_games(games: &[Game]) {
    if games.is_empty() {
        println!("no games");
    }
    for game in games {
        let venue = match game.home_away {
            HomeAway::Home => "vs",
            HomeAway::Away => "@",
        };
        let result = match (game.score_us, game.score_them, game.win) {
            (Some(us), Some(them), Some(true)) => format!("W {us}-{them}"),
            (Some(us), Some(them), _) => format!("L {us}-{them}"),
            _ => String::new(),
        };
        println!(
            "{:>4}  {}  {:<16} {} {:<24} {}",
            game.id,
            game.game_date_time.format("%Y-%m-%d %H:%M"),
            game.team_name,
            venue,
            game.opponent,
            result
        );
    }
}

fn print_staff(staff: &[StaffMember]) {
    if staff.is_empty() {
        println!("no staff");
    }
    for member in staff {
        let inactive = if member.active { "" } else { " (inactive)" };
        println!(
            "{:>4}  {:<24} {:<9} {}{}",
            member.id,
            member.full_name,
            member.team_level.as_str(),
            member.position,
            inactive
        );
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

async fn run(client: &ApiClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { email, password } => {
            let session = client.login(&email, &password).await?;
            println!(
                "logged in as {}",
                session.full_name.as_deref().unwrap_or(&email)
            );
        }
        Command::Logout => {
            client.logout()?;
            println!("logged out");
        }
        Command::Whoami => {
            let session = client.session().current_session();
            match (session.is_authenticated(), session.full_name, session.email) {
                (true, name, email) => println!(
                    "{} <{}>",
                    name.as_deref().unwrap_or("unknown"),
                    email.as_deref().unwrap_or("-")
                ),
                (false, ..) => println!("not logged in"),
            }
        }
        Command::Teams => print_teams(&client.public().teams().await?),
        Command::Roster(team) => {
            print_players(&client.public().players_by_team(team).await?)
        }
        Command::Schedule => print_games(&client.public().schedule().await?),
        Command::Upcoming(n) => {
            print_games(&client.public().upcoming_games(n).await?)
        }
        Command::Recent(n) => print_games(&client.public().recent_games(n).await?),
        Command::Staff(level) => print_staff(&client.public().staff(level).await?),
        Command::AdminTeams => print_teams(&client.admin_teams().list().await?),
        Command::CreateTeam { name, level } => {
            let team = client
                .admin_teams()
                .create(&TeamInput { name, level })
                .await?;
            println!("created team {} ({})", team.id, team.name);
        }
        Command::DeleteTeam(id) => {
            client.admin_teams().delete(id).await?;
            println!("deleted team {id}");
        }
        Command::AdminGames => print_games(&client.admin_games().list().await?),
        Command::AdminStaff => print_staff(&client.admin_staff().list().await?),
        Command::AdminRoster(team) => {
            print_players(&client.admin_players().list_by_team(team).await?)
        }
    }
    Ok(())
}

fn build_client() -> anyhow::Result<ApiClient> {
    let mut config = ClientConfig::from_env()?;
    if config.session_file.is_none() {
        config.session_file = Some(PathBuf::from(DEFAULT_SESSION_FILE));
    }
    tracing::debug!(
        base_url = %config.base_url,
        session_file = ?config.session_file,
        "starting courtside-admin"
    );
    Ok(ApiClient::builder().config(config).build()?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "help" || args[0] == "--help" {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {e:#}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let result = match build_client() {
        Ok(client) => run(&client, command).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e
                .downcast_ref::<CourtsideError>()
                .is_some_and(CourtsideError::is_auth_failure)
            {
                eprintln!("hint: run `courtside-admin login <email> <password>`");
            }
            ExitCode::FAILURE
        }
    }
}
