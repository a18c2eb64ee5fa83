mod body;
mod confirm;
mod fields;
mod footer;
mod layout;
mod lists;
mod panel;
mod popup;
mod states;

pub use body::render_form_body;
pub use confirm::render_prompt;
pub use footer::render_footer;
pub use lists::{render_customers, render_editor, render_posts};
pub use panel::render_status_panel;
pub use popup::render_popup;
