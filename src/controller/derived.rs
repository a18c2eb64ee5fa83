//! Values computed on demand from the current form snapshot. Nothing here is
//! stored, so it can never drift from the values it is derived from.

use crate::domain::{
    ExistingCustomer, FormValues, SelectOption,
    lookup::{self, cities_for, states_for},
};

/// `baseAmount × quantity` for the selected customer, 0 without a selection.
pub fn money_to_take(customer: Option<&ExistingCustomer>, quantity: f64) -> f64 {
    customer.map_or(0.0, |customer| customer.base_amount * quantity)
}

pub fn state_options(values: &FormValues) -> &'static [SelectOption] {
    states_for(&values.country)
}

pub fn city_options(values: &FormValues) -> &'static [SelectOption] {
    if values.country.is_empty() || values.state.is_empty() {
        return &[];
    }
    cities_for(&values.country, &values.state)
}

/// One-line address summary shown in the admin status panel.
pub fn address_summary(values: &FormValues, address_dirty: bool) -> String {
    if values.country.is_empty() {
        return "No country selected".to_string();
    }
    let country = lookup::country_label(&values.country).unwrap_or(values.country.as_str());
    let mut summary = format!("Country: {country}");
    if !values.state.is_empty() {
        let state = lookup::state_label(&values.country, &values.state).unwrap_or(values.state.as_str());
        summary.push_str(&format!(", State: {state}"));
    }
    if address_dirty {
        summary.push_str(" (Modified)");
    }
    summary
}

/// Formats an amount with Indian digit grouping (`12,34,567`), as the money
/// panel does.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let fraction = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let grouped = if digits.len() <= 3 {
        digits
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let mut groups = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            groups.push(right);
            rest = left;
        }
        groups.push(rest);
        groups.reverse();
        format!("{},{tail}", groups.join(","))
    };

    let sign = if negative { "-" } else { "" };
    if fraction == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction:02}")
    }
}
