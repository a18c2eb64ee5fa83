use crate::controller::{ChangeOutcome, DependencyController, PendingChange};

use super::{
    actions::{CommandEffect, FormCommand},
    field::{Dirty, FieldKey, FieldValue},
    schema::FormValidator,
    state::FormStore,
    validation::validate_field,
};

/// Routes form commands through the dependency controller into the store.
///
/// Country, state and customer edits go to the controller so that dependent
/// fields follow; everything else is a plain user edit.
pub struct FormEngine<'a> {
    store: &'a mut FormStore,
    controller: &'a mut DependencyController,
    validator: &'a FormValidator,
}

impl<'a> FormEngine<'a> {
    pub fn new(
        store: &'a mut FormStore,
        controller: &'a mut DependencyController,
        validator: &'a FormValidator,
    ) -> Self {
        Self {
            store,
            controller,
            validator,
        }
    }

    pub fn dispatch(&mut self, command: FormCommand) -> Result<CommandEffect, String> {
        match command {
            FormCommand::Edit { key, value } => self.edit(key, value),
            FormCommand::Blur(key) => {
                validate_field(self.store, self.validator, key)?;
                Ok(CommandEffect::None)
            }
            FormCommand::SelectCustomer(id) => {
                let outcome = self
                    .controller
                    .select_customer(self.store, id.as_deref())
                    .map_err(|err| err.to_string())?;
                Ok(effect_of(outcome))
            }
            FormCommand::EditAdminDetails(details) => {
                self.controller.edit_admin_details(details);
                Ok(CommandEffect::None)
            }
            FormCommand::AddContact => {
                self.store.add_contact();
                Ok(CommandEffect::None)
            }
            FormCommand::RemoveContact(index) => {
                if !self.store.remove_contact(index) {
                    return Err(format!("no contact at position {}", index + 1));
                }
                Ok(CommandEffect::None)
            }
            FormCommand::ConfirmPending => Ok(self.confirm_pending()),
            FormCommand::CancelPending => {
                let cancelled = match self.controller.pending() {
                    Some(PendingChange::Country(_)) => self.controller.cancel_address_change(),
                    Some(PendingChange::Customer(_)) => self.controller.cancel_customer_change(),
                    Some(PendingChange::Leave) => self.controller.cancel_leave(),
                    None => false,
                };
                tracing::debug!(cancelled, "pending change dismissed");
                Ok(CommandEffect::None)
            }
            FormCommand::RequestLeave => Ok(match self.controller.request_leave(self.store) {
                ChangeOutcome::Applied => CommandEffect::Leave,
                ChangeOutcome::ConfirmationRequired => CommandEffect::ConfirmationRequired,
            }),
            FormCommand::Reset => {
                self.store.reset();
                self.controller.reset();
                Ok(CommandEffect::None)
            }
        }
    }

    fn edit(&mut self, key: FieldKey, value: FieldValue) -> Result<CommandEffect, String> {
        match key {
            FieldKey::Country => {
                let outcome = self.controller.change_country(self.store, &text_of(value));
                Ok(effect_of(outcome))
            }
            FieldKey::State => {
                self.controller.change_state(self.store, &text_of(value));
                Ok(CommandEffect::None)
            }
            _ => {
                self.store
                    .set_value(key, value, Dirty::Mark)
                    .map_err(|err| err.message)?;
                Ok(CommandEffect::None)
            }
        }
    }

    fn confirm_pending(&mut self) -> CommandEffect {
        match self.controller.pending() {
            Some(PendingChange::Country(_)) => {
                self.controller.confirm_address_change(self.store);
                CommandEffect::None
            }
            Some(PendingChange::Customer(_)) => {
                self.controller.confirm_customer_change(self.store);
                CommandEffect::None
            }
            Some(PendingChange::Leave) => {
                self.controller.confirm_leave();
                CommandEffect::Leave
            }
            None => CommandEffect::None,
        }
    }
}

fn effect_of(outcome: ChangeOutcome) -> CommandEffect {
    match outcome {
        ChangeOutcome::Applied => CommandEffect::None,
        ChangeOutcome::ConfirmationRequired => CommandEffect::ConfirmationRequired,
    }
}

fn text_of(value: FieldValue) -> String {
    match value {
        FieldValue::Text(text) => text,
        other => other.display(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::DependencyController;

    struct Fixture {
        store: FormStore,
        controller: DependencyController,
        validator: FormValidator,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: FormStore::default(),
                controller: DependencyController::new(),
                validator: FormValidator::new().expect("validator"),
            }
        }

        fn dispatch(&mut self, command: FormCommand) -> Result<CommandEffect, String> {
            FormEngine::new(&mut self.store, &mut self.controller, &self.validator)
                .dispatch(command)
        }
    }

    #[test]
    fn country_edit_goes_through_controller() {
        let mut fx = Fixture::new();
        fx.dispatch(FormCommand::Edit {
            key: FieldKey::Country,
            value: FieldValue::text("IN"),
        })
        .expect("edit");
        assert_eq!(fx.store.values().state, "UP");
        assert_eq!(fx.store.values().city, "Lucknow");
    }

    #[test]
    fn confirm_pending_resolves_current_proposal() {
        let mut fx = Fixture::new();
        fx.dispatch(FormCommand::Edit {
            key: FieldKey::Country,
            value: FieldValue::text("IN"),
        })
        .expect("edit");
        fx.dispatch(FormCommand::Edit {
            key: FieldKey::City,
            value: FieldValue::text("Kanpur"),
        })
        .expect("edit");
        let effect = fx
            .dispatch(FormCommand::Edit {
                key: FieldKey::Country,
                value: FieldValue::text("US"),
            })
            .expect("edit");
        assert_eq!(effect, CommandEffect::ConfirmationRequired);
        fx.dispatch(FormCommand::ConfirmPending).expect("confirm");
        assert_eq!(fx.store.values().city, "Los Angeles");
    }

    #[test]
    fn blur_reports_field_message() {
        let mut fx = Fixture::new();
        fx.dispatch(FormCommand::Edit {
            key: FieldKey::Age,
            value: FieldValue::text("17"),
        })
        .expect("edit");
        let err = fx.dispatch(FormCommand::Blur(FieldKey::Age)).unwrap_err();
        assert_eq!(err, "Must be at least 18");
        assert_eq!(fx.store.error(FieldKey::Age), Some("Must be at least 18"));
    }

    #[test]
    fn unparsable_number_is_reported() {
        let mut fx = Fixture::new();
        let err = fx
            .dispatch(FormCommand::Edit {
                key: FieldKey::EstimatedQuantity,
                value: FieldValue::text("lots"),
            })
            .unwrap_err();
        assert!(!err.is_empty());
        assert!(fx.store.is_field_dirty(FieldKey::EstimatedQuantity));
    }

    #[test]
    fn leaving_dirty_form_needs_confirmation() {
        let mut fx = Fixture::new();
        assert_eq!(
            fx.dispatch(FormCommand::RequestLeave),
            Ok(CommandEffect::Leave)
        );
        fx.dispatch(FormCommand::Edit {
            key: FieldKey::Name,
            value: FieldValue::text("Dana"),
        })
        .expect("edit");
        assert_eq!(
            fx.dispatch(FormCommand::RequestLeave),
            Ok(CommandEffect::ConfirmationRequired)
        );
        assert_eq!(
            fx.dispatch(FormCommand::ConfirmPending),
            Ok(CommandEffect::Leave)
        );
    }

    #[test]
    fn reset_clears_customer_selection_and_admin_copy() {
        let mut fx = Fixture::new();
        fx.dispatch(FormCommand::SelectCustomer(Some("1".into())))
            .expect("select");
        let mut details = fx.controller.admin_details().clone();
        details.device.push_str(" Pro");
        fx.dispatch(FormCommand::EditAdminDetails(details))
            .expect("edit admin");
        assert!(fx.controller.is_admin_customer_dirty());
        let effect = fx
            .dispatch(FormCommand::SelectCustomer(Some("2".into())))
            .expect("switch");
        assert_eq!(effect, CommandEffect::ConfirmationRequired);

        fx.dispatch(FormCommand::Reset).expect("reset");

        assert!(!fx.controller.is_admin_customer_dirty());
        assert_eq!(fx.controller.selected_customer_id(), None);
        assert_eq!(fx.controller.pending(), None);
        assert_eq!(fx.controller.admin_details().name, "");
        assert_eq!(fx.controller.money_to_take(&fx.store), 0.0);
        assert!(!fx.store.is_dirty());
        assert_eq!(fx.store.values().name, "");
    }

    #[test]
    fn unknown_contact_removal_is_an_error() {
        let mut fx = Fixture::new();
        assert!(fx.dispatch(FormCommand::RemoveContact(0)).is_err());
        fx.dispatch(FormCommand::AddContact).expect("add");
        assert_eq!(fx.store.values().contacts.len(), 1);
        fx.dispatch(FormCommand::RemoveContact(0)).expect("remove");
        assert!(fx.store.values().contacts.is_empty());
    }
}
