// Components module - reusable UI building blocks
//
// Each component takes a `*Props` struct at construction and implements
// `Component` (and `Interactive` when it reacts to keys). Components never
// perform side effects; anything that leaves the widget (a copy, a table
// action) is returned to the owner.

pub mod accordion;
pub mod blockquote;
pub mod footer;
pub mod hover_card;
pub mod numeric_input;
pub mod pin_input;
pub mod portforward_table;
pub mod progress;
pub mod skeleton;
pub mod toast;

pub use accordion::{Accordion, AccordionItem, AccordionProps};
pub use blockquote::{Blockquote, BlockquoteProps};
pub use footer::{Footer, FooterProps};
pub use hover_card::{HoverCard, HoverCardProps};
pub use numeric_input::{NumericInput, NumericInputProps};
pub use pin_input::{PinInput, PinInputProps};
pub use portforward_table::{
    parse_records, ForwardStatus, ForwardingFlags, PortForwardRecord, PortForwardTable,
    PortForwardTableProps, TableAction,
};
pub use progress::{ProgressBar, ProgressBarProps, ProgressCircle, ProgressCircleProps};
pub use skeleton::{Skeleton, SkeletonProps};
pub use toast::{Toast, ToastLevel, TOAST_DURATION};
