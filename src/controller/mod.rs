//! Reacts to changes of the country, state and existing-customer fields.
//!
//! The controller decides whether a change is applied right away (with the
//! dependent fields auto-populated) or parked as a [`Pending`] proposal that
//! the operator has to confirm, so that manual edits are never discarded
//! silently. It only mutates form values through [`FormStore::set_value`].

mod derived;
mod error;
mod pending;

pub use derived::{address_summary, city_options, format_amount, money_to_take, state_options};
pub use error::ControllerError;
pub use pending::Pending;

use crate::{
    domain::{
        AdminCustomerDetails, DEFAULT_ESTIMATED_QUANTITY, ExistingCustomer,
        lookup::{find_customer, first_city, first_state},
    },
    form::{Dirty, FieldKey, FieldValue, FormStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    Applied,
    ConfirmationRequired,
}

/// The single outstanding proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingChange {
    Country(String),
    Customer(Option<String>),
    Leave,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyController {
    selected_customer: Option<String>,
    admin_details: AdminCustomerDetails,
    admin_dirty: bool,
    pending: Pending<PendingChange>,
}

impl DependencyController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&PendingChange> {
        self.pending.peek()
    }

    pub fn selected_customer_id(&self) -> Option<&str> {
        self.selected_customer.as_deref()
    }

    pub fn selected_customer(&self) -> Option<&'static ExistingCustomer> {
        self.selected_customer.as_deref().and_then(find_customer)
    }

    pub fn admin_details(&self) -> &AdminCustomerDetails {
        &self.admin_details
    }

    pub fn is_admin_customer_dirty(&self) -> bool {
        self.admin_dirty
    }

    /// Operator edit of the shadow copy; marks it diverged from the source record.
    pub fn edit_admin_details(&mut self, details: AdminCustomerDetails) {
        self.admin_details = details;
        self.admin_dirty = true;
    }

    pub fn money_to_take(&self, store: &FormStore) -> f64 {
        money_to_take(self.selected_customer(), store.values().estimated_quantity)
    }

    /* ------------------ address cascade ------------------ */

    pub fn change_country(&mut self, store: &mut FormStore, country: &str) -> ChangeOutcome {
        let current = store.values().country.clone();
        if store.is_address_dirty() && !current.is_empty() && current != country {
            tracing::debug!(from = %current, to = %country, "country change needs confirmation");
            self.pending.propose(PendingChange::Country(country.to_string()));
            return ChangeOutcome::ConfirmationRequired;
        }
        write_text(store, FieldKey::Country, country, Dirty::Mark);
        populate_address(store, country);
        ChangeOutcome::Applied
    }

    /// Applies the pending country and re-derives state and city; returns false
    /// when no country change was pending.
    pub fn confirm_address_change(&mut self, store: &mut FormStore) -> bool {
        let Some(PendingChange::Country(country)) = self
            .pending
            .confirm_if(|change| matches!(change, PendingChange::Country(_)))
        else {
            return false;
        };
        tracing::debug!(to = %country, "country change confirmed");
        write_text(store, FieldKey::Country, &country, Dirty::Clear);
        populate_address(store, &country);
        true
    }

    pub fn cancel_address_change(&mut self) -> bool {
        self.pending
            .cancel_if(|change| matches!(change, PendingChange::Country(_)))
            .is_some()
    }

    /// State changes are never gated; the city follows unless the user already
    /// picked one.
    pub fn change_state(&mut self, store: &mut FormStore, state: &str) {
        write_text(store, FieldKey::State, state, Dirty::Mark);
        if !store.is_field_dirty(FieldKey::City) {
            let country = store.values().country.clone();
            write_text(store, FieldKey::City, first_city(&country, state), Dirty::Clear);
        }
    }

    /* ------------------ existing customer ------------------ */

    pub fn select_customer(
        &mut self,
        store: &mut FormStore,
        id: Option<&str>,
    ) -> Result<ChangeOutcome, ControllerError> {
        if let Some(id) = id
            && find_customer(id).is_none()
        {
            return Err(ControllerError::UnknownCustomer(id.to_string()));
        }

        let has_dirty_state =
            self.admin_dirty || store.is_field_dirty(FieldKey::EstimatedQuantity);
        let is_changing = self.selected_customer.as_deref() != id;
        if has_dirty_state && is_changing && self.selected_customer.is_some() {
            tracing::debug!(
                from = ?self.selected_customer,
                to = ?id,
                "customer switch needs confirmation"
            );
            self.pending
                .propose(PendingChange::Customer(id.map(str::to_string)));
            return Ok(ChangeOutcome::ConfirmationRequired);
        }

        self.apply_customer(store, id);
        Ok(ChangeOutcome::Applied)
    }

    /// Applies the pending selection and resets a modified quantity to its
    /// default; returns false when no customer change was pending.
    pub fn confirm_customer_change(&mut self, store: &mut FormStore) -> bool {
        let Some(PendingChange::Customer(id)) = self
            .pending
            .confirm_if(|change| matches!(change, PendingChange::Customer(_)))
        else {
            return false;
        };
        tracing::debug!(to = ?id, "customer switch confirmed");
        self.apply_customer(store, id.as_deref());
        if store.is_field_dirty(FieldKey::EstimatedQuantity) {
            write(
                store,
                FieldKey::EstimatedQuantity,
                FieldValue::Number(DEFAULT_ESTIMATED_QUANTITY),
                Dirty::Clear,
            );
        }
        true
    }

    pub fn cancel_customer_change(&mut self) -> bool {
        self.pending
            .cancel_if(|change| matches!(change, PendingChange::Customer(_)))
            .is_some()
    }

    fn apply_customer(&mut self, store: &mut FormStore, id: Option<&str>) {
        self.selected_customer = id.map(str::to_string);
        match id.and_then(find_customer) {
            Some(customer) => {
                write_text(store, FieldKey::Name, customer.name, Dirty::Clear);
                write_text(store, FieldKey::Email, customer.email, Dirty::Clear);
                write(store, FieldKey::Age, FieldValue::Integer(customer.age), Dirty::Clear);
                self.admin_details = AdminCustomerDetails::from_customer(customer);
            }
            None => {
                self.admin_details = AdminCustomerDetails::blank();
            }
        }
        self.admin_dirty = false;
    }

    /// Back to no selection, a blank clean admin copy and no proposal.
    pub fn reset(&mut self) {
        self.selected_customer = None;
        self.admin_details = AdminCustomerDetails::blank();
        self.admin_dirty = false;
        if let Some(dropped) = self.pending.cancel() {
            tracing::debug!(?dropped, "pending change dropped by reset");
        }
    }

    /* ------------------ leaving the form ------------------ */

    /// Leaving a dirty form needs confirmation; a clean form can be left at once.
    pub fn request_leave(&mut self, store: &FormStore) -> ChangeOutcome {
        if store.is_dirty() {
            self.pending.propose(PendingChange::Leave);
            ChangeOutcome::ConfirmationRequired
        } else {
            ChangeOutcome::Applied
        }
    }

    pub fn confirm_leave(&mut self) -> bool {
        self.pending
            .confirm_if(|change| matches!(change, PendingChange::Leave))
            .is_some()
    }

    pub fn cancel_leave(&mut self) -> bool {
        self.pending
            .cancel_if(|change| matches!(change, PendingChange::Leave))
            .is_some()
    }
}

fn populate_address(store: &mut FormStore, country: &str) {
    let state = first_state(country);
    write_text(store, FieldKey::State, state, Dirty::Clear);
    write_text(store, FieldKey::City, first_city(country, state), Dirty::Clear);
}

fn write_text(store: &mut FormStore, key: FieldKey, text: &str, dirty: Dirty) {
    write(store, key, FieldValue::text(text), dirty);
}

fn write(store: &mut FormStore, key: FieldKey, value: FieldValue, dirty: Dirty) {
    if let Err(err) = store.set_value(key, value, dirty) {
        tracing::warn!(%err, "controller write rejected");
    }
}
