//! Reusable UI components shared by every screen

pub mod dropdown;
pub mod input;
pub mod modal;
pub mod table;
pub mod toast;

pub use dropdown::{DropdownEvent, FilterDropdown, FilterOption};
pub use input::TextInput;
pub use modal::{ConfirmModal, ModalEvent};
pub use table::{Column, DataTable, Pagination, TableEvent, CELL_PLACEHOLDER};
pub use table::{capitalize, resolve_path, row_id};
pub use toast::{Toast, ToastKind, Toasts};
