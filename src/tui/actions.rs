use super::state::{AppScreen, AppState};

/// Reconcile view state with the storefront after an event.
///
/// Cursors are pulled back inside shrunken lists, and a cart checkout whose
/// lines all disappeared returns to the cart.
pub fn process_state(state: &mut AppState) {
    let visible = state.visible_products().len();
    state.selected_row = state.selected_row.min(visible.saturating_sub(1));

    let cart_len = state.store.cart().len();
    state.cart_row = state.cart_row.min(cart_len.saturating_sub(1));

    match state.screen {
        AppScreen::Checkout => {
            let lines = state.checkout_lines().len();
            if lines == 0 {
                state.set_error("Nothing left to check out".to_string());
                state.leave_checkout();
            } else {
                state.checkout_row = state.checkout_row.min(lines - 1);
            }
        }
        AppScreen::ConfirmDelete => {
            if state.store.cart().selected_count() == 0 {
                state.screen = AppScreen::Cart;
            }
        }
        AppScreen::ProductDetail => {
            if state.detail().is_none() {
                state.close_detail();
            }
        }
        _ => {}
    }
}
