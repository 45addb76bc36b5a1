use std::fmt::Write;

use super::shortage::ShoppingListItem;

/// Plain-text export of a shopping list, ready for the clipboard.
/// `heading` names what the list was built for (a date range or a recipe).
pub fn render_text(heading: &str, items: &[ShoppingListItem]) -> String {
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("買い物リスト ({heading})\n");
    for item in items {
        let _ = write!(out, "\n• {} {}{}", item.name, item.quantity, item.unit);
        if item.checked {
            out.push_str(" ✓");
        }
    }
    let done = items.iter().filter(|i| i.checked).count();
    let _ = write!(out, "\n完了: {}/{}", done, items.len());
    out
}
