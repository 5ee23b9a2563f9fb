use axum::{extract::State, Json};

use crate::{error::Result, state::AppState};

use super::contact_models::Contact;

/// List contacts available for assignment
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contacts",
    responses(
        (status = 200, description = "Contacts sorted by name", body = [Contact]),
        (status = 502, description = "Task store unavailable")
    )
)]
pub async fn get_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    let contacts = state.contact_directory.read_all().await?;
    Ok(Json(contacts))
}
