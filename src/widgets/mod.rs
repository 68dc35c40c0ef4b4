//! Built-in widget kinds: Container, Text, Button, Canvas, Spacer, Checkbox,
//! Input, Dropdown and the inline decorations.

pub mod button;
pub mod canvas;
pub mod checkbox;
pub mod container;
pub mod dropdown;
pub mod inline;
pub mod input;
pub mod spacer;
pub mod text;

pub use button::Button;
pub use canvas::Canvas;
pub use checkbox::Checkbox;
pub use container::Container;
pub use dropdown::Dropdown;
pub use inline::{Decoration, Inline};
pub use input::Input;
pub use spacer::Spacer;
pub use text::Text;
