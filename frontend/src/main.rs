use literary_lions_frontend::{start, when_ready};

fn main() {
    let window = gloo::utils::window();
    let document = gloo::utils::document();

    when_ready(&document.clone(), move || {
        if let Some(bindings) = start(&window, &document) {
            bindings.forget();
        }
    });
}
