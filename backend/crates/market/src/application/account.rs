//! Acting account lookup shared by the buyer and author flows

use auth::AuthError;
use auth::domain::entity::user::User;
use auth::domain::repository::UserRepository;

use crate::error::{MarketError, MarketResult};

/// The stored record for `user`, which must still be allowed to sign in.
/// The caller's copy may predate a ban.
pub(crate) async fn active_account<U>(user_repo: &U, user: &User) -> MarketResult<User>
where
    U: UserRepository,
{
    let current = user_repo
        .find_by_id(&user.user_id)
        .await?
        .ok_or(MarketError::UserNotFound)?;
    if !current.can_login() {
        return Err(MarketError::Auth(AuthError::AccountDisabled));
    }
    Ok(current)
}
