use crate::presentation::PopupRender;

/// Selection list opened over a select-style row.
#[derive(Debug, Clone)]
pub(crate) struct PopupState<T> {
    pub(crate) target: T,
    title: String,
    values: Vec<Option<String>>,
    labels: Vec<String>,
    selected: usize,
}

impl<T> PopupState<T> {
    /// `options` pairs a value (or `None` for an explicit "none" entry) with
    /// its label; the entry matching `current` starts selected.
    pub(crate) fn new(
        target: T,
        title: impl Into<String>,
        options: Vec<(Option<String>, String)>,
        current: Option<&str>,
    ) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        let selected = options
            .iter()
            .position(|(value, _)| value.as_deref() == current)
            .unwrap_or(0);
        let (values, labels) = options.into_iter().unzip();
        Some(Self {
            target,
            title: title.into(),
            values,
            labels,
            selected,
        })
    }

    pub(crate) fn select_previous(&mut self) {
        if self.values.is_empty() {
            return;
        }
        if self.selected == 0 {
            self.selected = self.values.len().saturating_sub(1);
        } else {
            self.selected -= 1;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.values.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.values.len();
    }

    pub(crate) fn selected_value(&self) -> Option<&str> {
        self.values.get(self.selected).and_then(|value| value.as_deref())
    }

    pub(crate) fn as_render(&self) -> PopupRender<'_> {
        PopupRender {
            title: &self.title,
            options: &self.labels,
            selected: self.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup(current: Option<&str>) -> PopupState<()> {
        PopupState::new(
            (),
            "Country",
            vec![
                (Some("IN".into()), "India".into()),
                (Some("US".into()), "USA".into()),
            ],
            current,
        )
        .expect("options")
    }

    #[test]
    fn starts_on_current_value_and_wraps() {
        let mut state = popup(Some("US"));
        assert_eq!(state.selected_value(), Some("US"));
        state.select_next();
        assert_eq!(state.selected_value(), Some("IN"));
        state.select_previous();
        assert_eq!(state.selected_value(), Some("US"));
    }

    #[test]
    fn empty_options_open_nothing() {
        assert!(PopupState::new((), "City", Vec::new(), None).is_none());
    }
}
