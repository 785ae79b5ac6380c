use crate::app::App;

mod app;
mod components;
mod generator;
mod sinks;
mod storage;
mod widget;

fn main() {
    yew::Renderer::<App>::new().render();
}
