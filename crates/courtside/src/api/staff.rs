use courtside_protocol::{PhotoUpload, StaffId, StaffMember, StaffMemberInput};
use courtside_transport::{HttpRequest, Method, Transport};

use super::PHOTO_FIELD;
use crate::{ApiClient, CourtsideError};

const BASE: &str = "/admin/staff";

/// `/admin/staff` CRUD and photo upload. Requires a login.
///
/// Unlike the public listing this includes inactive staff.
pub struct AdminStaff<'a, T: Transport> {
    client: &'a ApiClient<T>,
}

impl<'a, T: Transport> AdminStaff<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<StaffMember>, CourtsideError> {
        self.client.fetch(HttpRequest::get(BASE)).await
    }

    pub async fn create(
        &self,
        input: &StaffMemberInput,
    ) -> Result<StaffMember, CourtsideError> {
        let request = self.client.json_request(Method::Post, BASE.into(), input)?;
        self.client.fetch(request).await
    }

    pub async fn update(
        &self,
        id: StaffId,
        input: &StaffMemberInput,
    ) -> Result<StaffMember, CourtsideError> {
        let request =
            self.client
                .json_request(Method::Put, format!("{BASE}/{id}"), input)?;
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: StaffId) -> Result<(), CourtsideError> {
        self.client
            .execute(HttpRequest::delete(format!("{BASE}/{id}")))
            .await?;
        Ok(())
    }

    /// `POST /admin/staff/photo` (multipart). Returns the stored photo's URL.
    pub async fn upload_photo(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, CourtsideError> {
        let request = HttpRequest::post(format!("{BASE}/photo")).file(
            PHOTO_FIELD,
            file_name,
            content_type,
            data,
        );
        let upload: PhotoUpload = self.client.fetch(request).await?;
        Ok(upload.url)
    }
}
