use tracing::{debug, warn};

use crate::{
    error::ApiError,
    store::{CostStore, UserStore},
    users::dto::UserDetails,
};

/// Profile plus the lifetime total of the user's costs.
pub async fn get_user_details(
    users: &dyn UserStore,
    costs: &dyn CostStore,
    raw_id: &str,
) -> Result<UserDetails, ApiError> {
    let id: i64 = raw_id.trim().parse().map_err(|_| {
        warn!(raw_id, "user details: id is not a number");
        ApiError::InvalidUserId
    })?;

    let Some(user) = users.find_by_id(id).await? else {
        warn!(id, "user details: no such user");
        return Err(ApiError::UserNotFound(id));
    };

    let total = costs.total_for_user(id).await?;
    debug!(id, total, "user total computed");

    Ok(UserDetails {
        first_name: user.first_name,
        last_name: user.last_name,
        id: user.id,
        total,
    })
}
