//! Screen transitions requested by the presentation layer.

use std::fmt;

use pixaview_model::ImagePair;

pub trait Navigator: Send + Sync + fmt::Debug {
    /// Shows the initial search screen.
    fn start(&self);

    /// Opens the preview for `pair`. `selected_index` is `0` for the primary
    /// image and `1` for the themed one; callers pass an index that exists in
    /// the pair, see [`ImageSlot::resolve`](pixaview_model::ImageSlot::resolve).
    fn show_preview(&self, pair: ImagePair, selected_index: usize);
}
