use carta::pricing::display_price;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Color, Style, Theme, object::Rows},
};

/// Render rows under a bold header.
pub(crate) fn render<const N: usize>(header: [&str; N], rows: Vec<[String; N]>) -> String {
    let mut builder = Builder::default();

    builder.push_record(header.map(str::to_string));

    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    table.to_string()
}

/// `S/. 12.50`, or the raw amount when it cannot be displayed.
pub(crate) fn price(amount: Decimal) -> String {
    display_price(amount).unwrap_or_else(|_| amount.to_string())
}
