use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::state::{AppScreen, AppState};
use crate::{cart_total, SortKey, Theme};

/// Colors for one theme.
struct Palette {
    bg: Color,
    text: Color,
    sub: Color,
    accent: Color,
    highlight_fg: Color,
    highlight_bg: Color,
    border: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::White,
            text: Color::Black,
            sub: Color::DarkGray,
            accent: Color::Rgb(238, 77, 45),
            highlight_fg: Color::White,
            highlight_bg: Color::Rgb(238, 77, 45),
            border: Color::Gray,
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(18, 18, 18),
            text: Color::White,
            sub: Color::Gray,
            accent: Color::Rgb(255, 140, 90),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(255, 140, 90),
            border: Color::DarkGray,
        },
    }
}

/// Main render function that dispatches to the appropriate screen renderer.
pub fn render(f: &mut Frame, state: &AppState) {
    let p = palette(state.store.theme());
    f.render_widget(Block::default().style(Style::default().bg(p.bg)), f.area());

    match state.screen {
        AppScreen::Catalog | AppScreen::SearchInput => render_catalog(f, state, &p),
        AppScreen::ProductDetail => {
            render_catalog(f, state, &p);
            render_product_detail(f, state, &p);
        }
        AppScreen::Cart => render_cart(f, state, &p),
        AppScreen::ConfirmDelete => {
            render_cart(f, state, &p);
            render_confirm_delete(f, state, &p);
        }
        AppScreen::Checkout => render_checkout(f, state, &p),
        AppScreen::OrderPlaced => {
            render_catalog(f, state, &p);
            render_order_placed(f, state, &p);
        }
    }
}

/// Render the product grid with search box and sort bar.
fn render_catalog(f: &mut Frame, state: &AppState, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let header = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14), Constraint::Length(9)])
        .split(chunks[0]);

    let searching = state.screen == AppScreen::SearchInput;
    let search_text = if state.search_query.is_empty() && !searching {
        Span::styled("Search products...", Style::default().fg(p.sub))
    } else {
        Span::styled(state.search_query.as_str(), Style::default().fg(p.text))
    };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if searching { p.accent } else { p.border })),
    );
    f.render_widget(search, header[0]);
    if searching {
        let cursor_x = header[0].x + state.search_query.chars().count() as u16 + 1;
        f.set_cursor_position((cursor_x, header[0].y + 1));
    }

    let cart_len = state.store.cart().len();
    let badge = if cart_len > 0 {
        format!("Cart ({cart_len})")
    } else {
        "Cart".to_string()
    };
    let cart = Paragraph::new(badge)
        .style(Style::default().fg(p.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(cart, header[1]);

    let theme_label = if state.store.theme().is_dark() { "Light" } else { "Dark" };
    let theme = Paragraph::new(theme_label)
        .style(Style::default().fg(p.sub))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(theme, header[2]);

    f.render_widget(Paragraph::new(sort_bar(state, p)), chunks[1]);

    let products = state.visible_products();
    if products.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No matching items",
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try a different search term.",
                Style::default().fg(p.sub),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
        f.render_widget(empty, chunks[2]);
    } else {
        let visible_row_limit = calculate_visible_rows(chunks[2].height);
        let visible_start = state
            .selected_row
            .saturating_sub(visible_row_limit.saturating_sub(1));

        let rows: Vec<Row> = products
            .iter()
            .enumerate()
            .skip(visible_start)
            .take(visible_row_limit)
            .map(|(i, product)| {
                Row::new(vec![
                    Cell::from(truncate(&product.name, 28)),
                    Cell::from(format_price(product.price)),
                    Cell::from(format!("★ {:.1}", product.rating)),
                    Cell::from(format!("{} sold", product.sold_count)),
                ])
                .style(row_style(i == state.selected_row, p))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(7),
                Constraint::Length(11),
            ],
        )
        .header(
            Row::new(vec!["Name", "Price", "Rating", "Sold"])
                .style(Style::default().fg(p.sub).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.border))
                .title(format!(" Products ({}) ", products.len())),
        );
        f.render_widget(table, chunks[2]);
    }

    let help = if searching {
        "Type to filter | Backspace: Delete | Enter/Esc: Done"
    } else {
        "Enter: Details | s: Search | 1-4: Sort | c: Cart | t: Theme | q: Quit"
    };
    f.render_widget(help_line(help, p), chunks[3]);

    render_status_bar(f, chunks[4], state, p);
}

fn sort_bar<'a>(state: &AppState, p: &Palette) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, key) in SortKey::ALL.iter().enumerate() {
        let active = state.sort.key() == *key;
        let style = if active {
            Style::default()
                .fg(p.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(p.sub)
        };
        let mut label = format!("{} {}", i + 1, key.label());
        if *key == SortKey::Price {
            label.push(' ');
            label.push_str(state.sort.price_direction().arrow());
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

/// Render the product detail modal.
fn render_product_detail(f: &mut Frame, state: &AppState, p: &Palette) {
    let Some(product) = state.detail() else {
        return;
    };
    let area = centered_rect(80, 85, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(p.accent))
        .title(" Product Details ")
        .style(Style::default().bg(p.bg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let image = state
        .store
        .assets()
        .resolve(&product.image)
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(no image)".to_string());

    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            product.name.as_str(),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format_price(product.price),
                Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "   ★ {:.1} ({} reviews)   {} sold",
                    product.rating, product.reviews_count, product.sold_count
                ),
                Style::default().fg(p.sub),
            ),
        ]),
        Line::from(Span::styled(format!("Image: {image}"), Style::default().fg(p.sub))),
        Line::from(""),
        Line::from(Span::styled(
            "Description",
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
    ]);
    f.render_widget(summary, chunks[0]);

    let description = Paragraph::new(product.description.as_str())
        .style(Style::default().fg(p.text))
        .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[1]);

    let mut review_lines = Vec::new();
    for review in &product.reviews {
        review_lines.push(Line::from(vec![
            Span::styled(
                review.user.as_str(),
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}  {}", stars(review.rating), review.date),
                Style::default().fg(p.sub),
            ),
        ]));
        review_lines.push(Line::from(Span::styled(
            review.comment.as_str(),
            Style::default().fg(p.text),
        )));
    }
    let reviews = Paragraph::new(review_lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(p.border))
                .title(" Reviews "),
        );
    f.render_widget(reviews, chunks[2]);

    let qty = Paragraph::new(Line::from(vec![
        Span::styled("Quantity:  - ", Style::default().fg(p.sub)),
        Span::styled(
            state.detail_qty.to_string(),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" +", Style::default().fg(p.sub)),
    ]));
    f.render_widget(qty, chunks[3]);

    f.render_widget(
        help_line("+/-: Quantity | a: Add to Cart | b: Buy Now | Esc: Close", p),
        chunks[4],
    );
}

/// Render the cart screen.
fn render_cart(f: &mut Frame, state: &AppState, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let cart = state.store.cart();

    let title = Paragraph::new("My Cart")
        .style(Style::default().fg(p.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(title, chunks[0]);

    let selected_count = cart.selected_count();
    let mut select_all = vec![Span::styled(
        format!("{} Select All", checkbox(cart.is_all_selected())),
        Style::default().fg(p.text),
    )];
    if selected_count > 0 {
        select_all.push(Span::raw("    "));
        select_all.push(Span::styled(
            format!("Delete ({selected_count})"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(select_all)), chunks[1]);

    if cart.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Your cart is empty",
                Style::default().fg(p.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Press Esc to start shopping.",
                Style::default().fg(p.sub),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
        f.render_widget(empty, chunks[2]);
    } else {
        let visible_row_limit = calculate_visible_rows(chunks[2].height);
        let visible_start = state
            .cart_row
            .saturating_sub(visible_row_limit.saturating_sub(1));

        let rows: Vec<Row> = cart
            .items()
            .iter()
            .enumerate()
            .skip(visible_start)
            .take(visible_row_limit)
            .map(|(i, item)| {
                Row::new(vec![
                    Cell::from(checkbox(item.selected)),
                    Cell::from(truncate(&item.product.name, 28)),
                    Cell::from(format_price(item.product.price)),
                    Cell::from(format!("- {} +", item.quantity)),
                    Cell::from(format_price(item.line_total())),
                ])
                .style(row_style(i == state.cart_row, p))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(20),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(12),
            ],
        )
        .header(
            Row::new(vec!["", "Item", "Price", "Qty", "Subtotal"])
                .style(Style::default().fg(p.sub).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(p.border))
                .title(format!(" Items ({}) ", cart.len())),
        );
        f.render_widget(table, chunks[2]);
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Total  ", Style::default().fg(p.sub)),
        Span::styled(
            format_price(cart.selected_total()),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(
            format!("Checkout ({selected_count})"),
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(footer, chunks[3]);

    f.render_widget(
        help_line(
            "Space: Select | a: All | +/-: Qty | d: Delete | Enter: Checkout | Esc: Back",
            p,
        ),
        chunks[4],
    );

    render_status_bar(f, chunks[5], state, p);
}

/// Render the delete confirmation prompt.
fn render_confirm_delete(f: &mut Frame, state: &AppState, p: &Palette) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let count = state.store.cart().selected_count();
    let prompt = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Are you sure you want to remove {count} selected item(s)?"),
            Style::default().fg(p.text),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: Remove | n: Cancel",
            Style::default().fg(p.sub),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Remove Items ")
            .style(Style::default().bg(p.bg)),
    );
    f.render_widget(prompt, area);
}

/// Render the checkout screen.
fn render_checkout(f: &mut Frame, state: &AppState, p: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .split(f.area());

    let direct = state.checkout.as_ref().is_some_and(|c| c.is_direct());
    let heading = if direct { "Buy Now" } else { "Checkout" };
    let title = Paragraph::new(heading)
        .style(Style::default().fg(p.text).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(title, chunks[0]);

    let lines = state.checkout_lines();
    let rows: Vec<Row> = lines
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Row::new(vec![
                Cell::from(truncate(&item.product.name, 28)),
                Cell::from(format_price(item.product.price)),
                Cell::from(format!("- {} +", item.quantity)),
                Cell::from(format_price(item.line_total())),
            ])
            .style(row_style(i == state.checkout_row, p))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Item", "Price", "Qty", "Subtotal"])
            .style(Style::default().fg(p.sub).add_modifier(Modifier::BOLD))
            .bottom_margin(1),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(p.border))
            .title(" Order Summary "),
    );
    f.render_widget(table, chunks[1]);

    let total = Paragraph::new(Line::from(vec![
        Span::styled("Total Payment  ", Style::default().fg(p.sub)),
        Span::styled(
            format_price(cart_total(&lines)),
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(p.border)));
    f.render_widget(total, chunks[2]);

    f.render_widget(
        help_line("+/-: Quantity | Enter: Place Order | Esc: Back", p),
        chunks[3],
    );

    render_status_bar(f, chunks[4], state, p);
}

/// Render the order confirmation notice.
fn render_order_placed(f: &mut Frame, state: &AppState, p: &Palette) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);

    let total = state.last_order.as_ref().map(|o| o.total).unwrap_or(0);
    let notice = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Your order has been placed!",
            Style::default().fg(p.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("Total paid: {}", format_price(total)),
            Style::default().fg(p.accent),
        )),
        Line::from(""),
        Line::from(Span::styled("Enter: OK", Style::default().fg(p.sub))),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Success ")
            .style(Style::default().bg(p.bg)),
    );
    f.render_widget(notice, area);
}

/// Render the status bar at the bottom.
fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState, p: &Palette) {
    let (status_text, style) = if let Some(ref error) = state.error_message {
        (format!(" Error: {error}"), Style::default().fg(Color::Red))
    } else if let Some(ref success) = state.success_message {
        (format!(" Status: {success}"), Style::default().fg(Color::Green))
    } else {
        let cart = state.store.cart();
        (
            format!(
                " {} products | {} in cart | {} theme",
                state.store.catalog().len(),
                cart.len(),
                state.store.theme()
            ),
            Style::default().fg(p.sub),
        )
    };

    let status = Paragraph::new(status_text)
        .style(style)
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(p.border)));
    f.render_widget(status, area);
}

fn help_line<'a>(text: &'a str, p: &Palette) -> Paragraph<'a> {
    Paragraph::new(text)
        .style(Style::default().fg(p.sub))
        .alignment(Alignment::Center)
}

fn row_style(highlighted: bool, p: &Palette) -> Style {
    if highlighted {
        Style::default()
            .fg(p.highlight_fg)
            .bg(p.highlight_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(p.text)
    }
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

// Borders plus header row and its margin.
fn calculate_visible_rows(table_height: u16) -> usize {
    table_height.saturating_sub(4) as usize
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// `₱55,000`
fn format_price(amount: u64) -> String {
    format!("₱{}", format_number(amount))
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetMap, Catalog, Storefront};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> AppState {
        let catalog = Catalog::builtin().unwrap();
        let assets = AssetMap::for_catalog(&catalog, "assets/images");
        AppState::new(Storefront::new(catalog, assets, Theme::Light))
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(750), "750");
        assert_eq!(format_number(55000), "55,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_price(12500), "₱12,500");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Gaming Mouse", 28), "Gaming Mouse");
        assert_eq!(truncate("Noise-Cancelling Headphones", 10), "Noise-C...");
    }

    #[test]
    fn catalog_screen_lists_products() {
        let state = app();
        let screen = draw(&state);
        assert!(screen.contains("Elite Laptop Pro"));
        assert!(screen.contains("Waterproof Desk Pad"));
        assert!(screen.contains("Top Sales"));
    }

    #[test]
    fn empty_search_shows_placeholder() {
        let mut state = app();
        state.search_query = "zzz".to_string();
        let screen = draw(&state);
        assert!(screen.contains("No matching items"));
    }

    #[test]
    fn cart_screen_shows_selected_total() {
        let mut state = app();
        state.store.add_to_cart_by_id("1", 1);
        state.store.add_to_cart_by_id("2", 2);
        state.screen = AppScreen::Cart;
        let screen = draw(&state);
        assert!(screen.contains("My Cart"));
        assert!(screen.contains("80,000"));
        assert!(screen.contains("Checkout (2)"));
    }

    #[test]
    fn detail_modal_shows_reviews() {
        let mut state = app();
        state.detail_product = Some("1".to_string());
        state.screen = AppScreen::ProductDetail;
        let screen = draw(&state);
        assert!(screen.contains("TechJuan"));
        assert!(screen.contains("assets/images/p1.png"));
    }
}
