mod components;
mod view;

pub use view::{
    CustomersContext, EditorRender, FieldRow, FooterContext, FormContext, MoneyPanel,
    PopupRender, PostsContext, PromptRender, RowHint, SectionView, StatusPanel, draw_customers,
    draw_form, draw_posts,
};
