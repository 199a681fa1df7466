// crates/lottieview-ui/src/modules/mod.rs
//
// Panel registry. To add a new panel:
//   1. Create modules/mypanel.rs implementing PanelModule
//   2. Add `pub mod mypanel;` below
//   3. Add a field for it in app.rs and call its ui() from the panel pass

pub mod controls;
pub mod surface;

use egui::Ui;
use lottieview_core::commands::PlayerCommand;
use lottieview_core::state::PlaybackState;

use crate::theme::Palette;

/// Every panel implements this trait.
/// Panels read state, emit commands — they never mutate state directly.
pub trait PanelModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui:      &mut Ui,
        state:   &PlaybackState,
        palette: &Palette,
        cmd:     &mut Vec<PlayerCommand>,
    );
}
