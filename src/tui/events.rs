use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppScreen, AppState};
use crate::SortKey;

/// Main event handler that dispatches to the appropriate screen handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    let Event::Key(key_event) = event else {
        return;
    };
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
        state.should_quit = true;
        return;
    }

    if state.screen != AppScreen::SearchInput && key_event.modifiers == KeyModifiers::NONE {
        match key_event.code {
            KeyCode::Char('q') => {
                state.should_quit = true;
                return;
            }
            KeyCode::Char('t') => {
                state.store.toggle_theme();
                return;
            }
            _ => {}
        }
    }

    match state.screen {
        AppScreen::Catalog => handle_catalog(key_event, state),
        AppScreen::SearchInput => handle_search_input(key_event, state),
        AppScreen::ProductDetail => handle_product_detail(key_event, state),
        AppScreen::Cart => handle_cart(key_event, state),
        AppScreen::ConfirmDelete => handle_confirm_delete(key_event, state),
        AppScreen::Checkout => handle_checkout(key_event, state),
        AppScreen::OrderPlaced => handle_order_placed(key_event, state),
    }
}

fn handle_catalog(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.selected_row > 0 {
                state.selected_row -= 1;
            }
        }
        KeyCode::Down => {
            if state.selected_row < state.visible_products().len().saturating_sub(1) {
                state.selected_row += 1;
            }
        }
        KeyCode::Enter => {
            state.clear_error();
            state.clear_success();
            state.open_detail();
        }
        KeyCode::Char('s') | KeyCode::Char('/') => {
            state.screen = AppScreen::SearchInput;
        }
        KeyCode::Char('1') => select_sort(state, SortKey::Latest),
        KeyCode::Char('2') => select_sort(state, SortKey::TopSales),
        KeyCode::Char('3') => select_sort(state, SortKey::TopRated),
        KeyCode::Char('4') => select_sort(state, SortKey::Price),
        KeyCode::Char('c') => {
            state.clear_error();
            state.screen = AppScreen::Cart;
        }
        KeyCode::Esc => {
            state.search_query.clear();
            state.selected_row = 0;
        }
        _ => {}
    }
}

fn select_sort(state: &mut AppState, key: SortKey) {
    state.sort.select(key);
    state.selected_row = 0;
}

fn handle_search_input(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char(c) => {
            state.search_query.push(c);
            state.selected_row = 0;
        }
        KeyCode::Backspace => {
            state.search_query.pop();
            state.selected_row = 0;
        }
        KeyCode::Enter | KeyCode::Esc => {
            state.screen = AppScreen::Catalog;
        }
        _ => {}
    }
}

fn handle_product_detail(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('+') | KeyCode::Right => {
            state.detail_qty = state.detail_qty.saturating_add(1);
        }
        KeyCode::Char('-') | KeyCode::Left => {
            state.detail_qty = state.detail_qty.saturating_sub(1).max(1);
        }
        KeyCode::Char('a') | KeyCode::Enter => state.add_detail_to_cart(),
        KeyCode::Char('b') => state.buy_detail_now(),
        KeyCode::Esc => state.close_detail(),
        _ => {}
    }
}

fn handle_cart(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.cart_row > 0 {
                state.cart_row -= 1;
            }
        }
        KeyCode::Down => {
            if state.cart_row < state.store.cart().len().saturating_sub(1) {
                state.cart_row += 1;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(id) = state.highlighted_cart_item().map(|i| i.id().to_string()) {
                state.store.cart_mut().toggle_select(&id);
            }
        }
        KeyCode::Char('a') => state.store.cart_mut().toggle_select_all(),
        KeyCode::Char('+') | KeyCode::Right => update_highlighted_quantity(state, 1),
        KeyCode::Char('-') | KeyCode::Left => update_highlighted_quantity(state, -1),
        KeyCode::Char('d') | KeyCode::Delete => state.request_delete(),
        KeyCode::Enter => state.begin_cart_checkout(),
        KeyCode::Esc => {
            state.clear_error();
            state.clear_success();
            state.screen = AppScreen::Catalog;
        }
        _ => {}
    }
}

fn update_highlighted_quantity(state: &mut AppState, delta: i64) {
    if let Some(id) = state.highlighted_cart_item().map(|i| i.id().to_string()) {
        state.store.cart_mut().update_quantity(&id, delta);
    }
}

fn handle_confirm_delete(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char('y') | KeyCode::Enter => state.delete_selected(),
        KeyCode::Char('n') | KeyCode::Esc => {
            state.screen = AppScreen::Cart;
        }
        _ => {}
    }
}

fn handle_checkout(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => {
            if state.checkout_row > 0 {
                state.checkout_row -= 1;
            }
        }
        KeyCode::Down => {
            if state.checkout_row < state.checkout_lines().len().saturating_sub(1) {
                state.checkout_row += 1;
            }
        }
        KeyCode::Char('+') | KeyCode::Right => state.adjust_checkout_quantity(1),
        KeyCode::Char('-') | KeyCode::Left => state.adjust_checkout_quantity(-1),
        KeyCode::Enter => state.confirm_order(),
        KeyCode::Esc => {
            state.clear_error();
            state.leave_checkout();
        }
        _ => {}
    }
}

fn handle_order_placed(event: KeyEvent, state: &mut AppState) {
    if matches!(event.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        state.last_order = None;
        state.selected_row = 0;
        state.screen = AppScreen::Catalog;
    }
}
