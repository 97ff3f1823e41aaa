// SPDX-License-Identifier: MPL-2.0
//! Text rendering of the metadata panels.
//!
//! Two panels are shown, one per [`TagCategory`]: image tags and location
//! tags. The location panel is followed by the derived decimal coordinates and
//! a map link.

use crate::domain::error::MetadataError;
use crate::domain::metadata::TagCategory;
use crate::i18n::I18n;
use crate::media::MetadataStore;
use std::fmt::Write;

/// Context required to render the panels.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub store: &'a MetadataStore,
}

/// Renders both panels and the derived location.
pub fn view(ctx: &ViewContext<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", ctx.i18n.tr("panel-title"));
    for category in TagCategory::ALL {
        out.push('\n');
        out.push_str(&view_panel(ctx, category));
    }
    out.push('\n');
    out.push_str(&view_location(ctx));
    out
}

/// Renders the rows of one category, one `label (Tag): value` line per tag.
pub fn view_panel(ctx: &ViewContext<'_>, category: TagCategory) -> String {
    let rows: Vec<_> = ctx
        .store
        .decode_for_display()
        .into_iter()
        .filter(|row| row.tag.category() == category)
        .collect();

    let labels: Vec<String> = rows.iter().map(|row| ctx.i18n.tr(row.tag.i18n_key())).collect();
    let width = rows
        .iter()
        .zip(&labels)
        .map(|(row, label)| label.chars().count() + row.tag.name().len() + 3)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "[{}]", ctx.i18n.tr(category.i18n_key()));
    for (row, label) in rows.iter().zip(&labels) {
        let heading = format!("{label} ({})", row.tag.name());
        let value = if row.value.is_empty() {
            ctx.i18n.tr("value-not-set")
        } else {
            row.value.clone()
        };
        let _ = writeln!(out, "  {heading:<width$} : {value}");
    }
    out
}

/// Renders the signed decimal location and a map link.
pub fn view_location(ctx: &ViewContext<'_>) -> String {
    let location = ctx.store.location();
    if location.is_null_island() {
        return format!("{}\n", ctx.i18n.tr("location-none"));
    }
    format!(
        "{}\n{}\n",
        ctx.i18n
            .tr_with_args("location-coordinates", &[("coordinates", &location.format())]),
        ctx.i18n.tr_with_args("location-map", &[("url", &location.map_url())])
    )
}

/// Localized message for a metadata error.
pub fn error_message(i18n: &I18n, error: &MetadataError) -> String {
    let args = error.i18n_args();
    let args_refs: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
    i18n.tr_with_args(error.i18n_key(), &args_refs)
}

/// One localized line per rejected edit.
pub fn rejection_lines(i18n: &I18n, rejected: &[MetadataError]) -> Vec<String> {
    rejected
        .iter()
        .map(|err| {
            let message = error_message(i18n, err);
            i18n.tr_with_args("edit-rejected", &[("message", &message)])
        })
        .collect()
}
