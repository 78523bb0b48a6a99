//! Landing page presentation built with Bevy UI.
//!
//! A fixed header sits over a column of full-viewport section panels that
//! follows the scroll container. The section counter and skip button float
//! in the bottom corners until the final section is reached.

pub mod landing_ui;
