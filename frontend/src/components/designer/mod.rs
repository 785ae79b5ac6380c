//! Designer shell: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `DesignerProps`, `DesignerShell`).
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.
//! - On first render, resolve the initial template from the local store
//!   (falling back to the built-in default) and kick off font resolution;
//!   the widget is mounted once the font arrives.
//! - Tear the session down when the component is destroyed.

use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DesignerProps;
pub use state::DesignerShell;

use crate::generator;

impl Component for DesignerShell {
    type Message = Msg;
    type Properties = DesignerProps;

    fn create(ctx: &Context<Self>) -> Self {
        DesignerShell::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            self.pending_initial = Some(self.session.resolve_initial_template());

            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::FontReady(generator::load_font().await));
            });
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.session.teardown();
    }
}
