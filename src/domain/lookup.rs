//! Static reference data backing the form's select fields.

use super::values::{ContactType, ExistingCustomer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

const fn city(name: &'static str) -> SelectOption {
    SelectOption {
        value: name,
        label: name,
    }
}

pub const COUNTRIES: &[SelectOption] = &[opt("IN", "India"), opt("US", "USA")];

const STATES: &[(&str, &[SelectOption])] = &[
    (
        "IN",
        &[
            opt("UP", "Uttar Pradesh"),
            opt("MH", "Maharashtra"),
            opt("DL", "Delhi"),
            opt("KA", "Karnataka"),
        ],
    ),
    (
        "US",
        &[
            opt("CA", "California"),
            opt("NY", "New York"),
            opt("TX", "Texas"),
            opt("FL", "Florida"),
        ],
    ),
];

const CITIES: &[(&str, &str, &[SelectOption])] = &[
    ("IN", "UP", &[city("Lucknow"), city("Kanpur")]),
    ("IN", "MH", &[city("Mumbai"), city("Pune")]),
    ("IN", "DL", &[city("New Delhi")]),
    ("IN", "KA", &[city("Bangalore"), city("Mysore")]),
    ("US", "CA", &[city("Los Angeles"), city("San Francisco")]),
    ("US", "NY", &[city("New York City"), city("Buffalo")]),
    ("US", "TX", &[city("Houston"), city("Austin")]),
    ("US", "FL", &[city("Miami"), city("Orlando")]),
];

pub const EXISTING_CUSTOMERS: &[ExistingCustomer] = &[
    ExistingCustomer {
        id: "1",
        name: "Bobby",
        age: 28,
        device: "iPhone 15 Pro",
        email: "bobby@example.com",
        base_amount: 100_000.0,
    },
    ExistingCustomer {
        id: "2",
        name: "Alice",
        age: 32,
        device: "Samsung Galaxy S24",
        email: "alice@example.com",
        base_amount: 150_000.0,
    },
    ExistingCustomer {
        id: "3",
        name: "Charlie",
        age: 25,
        device: "MacBook Pro",
        email: "charlie@example.com",
        base_amount: 200_000.0,
    },
];

/// States defined for `country`; empty for unknown or blank countries.
pub fn states_for(country: &str) -> &'static [SelectOption] {
    STATES
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, states)| *states)
        .unwrap_or(&[])
}

/// Cities defined for `state` within `country`; empty when either is unknown.
pub fn cities_for(country: &str, state: &str) -> &'static [SelectOption] {
    CITIES
        .iter()
        .find(|(c, s, _)| *c == country && *s == state)
        .map(|(_, _, cities)| *cities)
        .unwrap_or(&[])
}

pub fn first_state(country: &str) -> &'static str {
    states_for(country).first().map_or("", |option| option.value)
}

pub fn first_city(country: &str, state: &str) -> &'static str {
    cities_for(country, state)
        .first()
        .map_or("", |option| option.value)
}

pub fn find_customer(id: &str) -> Option<&'static ExistingCustomer> {
    EXISTING_CUSTOMERS.iter().find(|customer| customer.id == id)
}

pub fn country_label(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|option| option.value == code)
        .map(|option| option.label)
}

pub fn state_label(country: &str, state: &str) -> Option<&'static str> {
    states_for(country)
        .iter()
        .find(|option| option.value == state)
        .map(|option| option.label)
}

pub fn contact_type_options() -> [SelectOption; 2] {
    ContactType::ALL.map(|kind| match kind {
        ContactType::Phone => opt("phone", kind.label()),
        ContactType::Email => opt("email", kind.label()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_has_cities() {
        for country in COUNTRIES {
            for state in states_for(country.value) {
                assert!(
                    !cities_for(country.value, state.value).is_empty(),
                    "{}/{} has no cities",
                    country.value,
                    state.value
                );
            }
        }
    }

    #[test]
    fn defaults_follow_first_entries() {
        assert_eq!(first_state("IN"), "UP");
        assert_eq!(first_city("IN", "UP"), "Lucknow");
        assert_eq!(first_state("US"), "CA");
        assert_eq!(first_city("US", "CA"), "Los Angeles");
        assert_eq!(first_city("IN", "DL"), "New Delhi");
    }

    #[test]
    fn unknown_keys_yield_empty_lists() {
        assert!(states_for("FR").is_empty());
        assert!(states_for("").is_empty());
        assert!(cities_for("IN", "CA").is_empty());
        assert_eq!(first_state("FR"), "");
        assert_eq!(first_city("US", ""), "");
    }

    #[test]
    fn customers_are_found_by_id() {
        let alice = find_customer("2").expect("alice");
        assert_eq!(alice.name, "Alice");
        assert!(find_customer("9").is_none());
    }
}
