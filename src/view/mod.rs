pub mod card;
pub mod draft;
pub mod markup;
pub mod plain;
pub mod state;

pub use draft::EditableDraft;
pub use state::{Region, ViewState};
