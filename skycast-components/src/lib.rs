//! Reusable widgets for skycast
//!
//! Components implement the `Component<A>` trait and emit actions via callback
//! functions passed through Props.
//!
//! - [`TextInput`] - Single-line text input with cursor
//! - [`SuggestionList`] - Dropdown rows with a highlight and click selection
//!
//! ```ignore
//! use skycast_components::{SuggestionList, SuggestionListProps};
//!
//! let mut list = SuggestionList::default();
//! list.render(frame, area, SuggestionListProps {
//!     items: &labels,
//!     highlight: state.search.highlight,
//!     accent: Color::Cyan,
//!     on_select: Action::SearchSelect,
//! });
//! ```

mod suggestion_list;
mod text_input;

pub use suggestion_list::{SuggestionList, SuggestionListProps};
pub use text_input::{TextInput, TextInputProps};
