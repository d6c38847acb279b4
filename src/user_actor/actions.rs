//! Custom actions for the User actor.

use crate::model::{ProductId, Role, User};

#[derive(Debug, Clone)]
pub enum UserAction {
    /// Fails with [`UserError::WrongRole`](super::UserError::WrongRole) unless the user
    /// holds `Role`. Other actors use this to validate the identities they are handed;
    /// it also fails while the user is staged for deletion.
    RequireRole(Role),
    /// Adds the product to the wishlist, or removes it if already present.
    ToggleWishlist(ProductId),
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone)]
pub enum UserActionResult {
    RequireRole(User),
    /// `true` when the product is now on the wishlist.
    ToggleWishlist(bool),
}
