/*!
 * # Editing
 *
 * Everything between a classified [`BlockModel`](crate::models::BlockModel)
 * and the editing surface.
 *
 * ## Flow
 *
 * 1. A session loads source text and classifies it into blocks.
 * 2. [`EditableView::hydrate`] produces the text shown to the user: code
 *    verbatim, doc blocks as plain contents, plus one [`DocBlockRecord`] per
 *    doc block locating its contents by character offset.
 * 3. Edited records come back and are applied as [`Cmd`]s. Only contents
 *    change; block boundaries, indent and style stay fixed.
 * 4. The [`Reconstructor`] turns the model back into source. Unedited blocks
 *    are copied from the original bytes, edited doc blocks are re-wrapped in
 *    their comment style.
 *
 * ## Module Structure
 *
 * - **`view`**: hydrated text and the editable tuple records
 * - **`commands`**: edit commands and all-or-nothing record batches
 * - **`reconstruct`**: model back to source text
 * - **`session`**: one open document with load/save collaborators
 */

pub mod commands;
pub mod reconstruct;
pub mod session;
pub mod view;

pub use commands::{Cmd, apply_records};
pub use reconstruct::{Reconstructor, reconstruct};
pub use session::EditSession;
pub use view::{DocBlockRecord, EditableView};
