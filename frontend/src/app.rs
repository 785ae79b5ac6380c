use yew::{html, Component, Context, Html};

use crate::components::designer::DesignerShell;

pub struct App;

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let catalog_entries = vec!["invoice.json".to_string(), "letterhead.json".to_string()];
        html! {
            <div>
                <DesignerShell {catalog_entries} />
            </div>
        }
    }
}
