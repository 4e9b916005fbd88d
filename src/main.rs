use page_restyle::panel::PanelApp;

fn main() {
    if let Err(err) = dioxus::logger::init(tracing::Level::INFO) {
        eprintln!("failed to init logger: {err}");
    }
    dioxus::launch(PanelApp);
}
