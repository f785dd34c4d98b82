//! Table helpers shared by the listing pages: cell formatting and a pager.

#[cfg(test)]
#[path = "data_table_test.rs"]
mod data_table_test;

use leptos::prelude::*;

/// Placeholder shown for empty cells.
pub const EMPTY_CELL: &str = "-";

/// `value`, or [`EMPTY_CELL`] when blank.
pub fn cell_text(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() { EMPTY_CELL.to_owned() } else { trimmed.to_owned() }
}

/// Trimmed `value` as an optional filter or field; `None` when blank.
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Number of pages needed for `total` rows; at least one.
pub fn page_count(total: i64, page_size: u32) -> u32 {
    if total <= 0 || page_size == 0 {
        return 1;
    }
    let size = u64::from(page_size);
    let pages = total.unsigned_abs().div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// "Page 2 of 5 (93 total)".
pub fn page_summary(page: u32, total: i64, page_size: u32) -> String {
    format!("Page {page} of {} ({} total)", page_count(total, page_size), total.max(0))
}

/// Previous/next controls bound to a 1-based `page` signal.
#[component]
pub fn Pager(page: RwSignal<u32>, #[prop(into)] total: Signal<i64>, page_size: u32) -> impl IntoView {
    let last_page = move || page_count(total.get(), page_size);

    view! {
        <div class="pager">
            <button
                class="btn pager__prev"
                disabled=move || page.get() <= 1
                on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            <span class="pager__summary">{move || page_summary(page.get(), total.get(), page_size)}</span>
            <button
                class="btn pager__next"
                disabled=move || page.get() >= last_page()
                on:click=move |_| {
                    let last = last_page();
                    page.update(|p| *p = (*p + 1).min(last));
                }
            >
                "Next"
            </button>
        </div>
    }
}

/// Single-row "loading" / "no data" placeholder for a table body.
#[component]
pub fn EmptyRow(columns: usize, #[prop(into)] loading: Signal<bool>) -> impl IntoView {
    view! {
        <tr class="data-table__empty">
            <td colspan=columns.to_string()>{move || if loading.get() { "Loading..." } else { "No data" }}</td>
        </tr>
    }
}
