//! Open and close `<dialog>` elements by id.
//!
//! Both helpers report whether anything happened: a missing element, or one
//! that is not a dialog, is a no-op returning `false`.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

#[cfg(feature = "csr")]
fn dialog(id: &str) -> Option<web_sys::HtmlDialogElement> {
    use wasm_bindgen::JsCast;

    let element = web_sys::window()?.document()?.get_element_by_id(id)?;
    match element.dyn_into::<web_sys::HtmlDialogElement>() {
        Ok(dialog) => Some(dialog),
        Err(_) => {
            log::warn!("#{id} is not a <dialog>");
            None
        }
    }
}

/// Show the dialog with `id` as a modal.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn show_modal(id: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        let Some(dialog) = dialog(id) else {
            return false;
        };
        match dialog.show_modal() {
            Ok(()) => true,
            Err(err) => {
                log::warn!("showModal on #{id} failed: {err:?}");
                false
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

/// Close the dialog with `id`.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn close_modal(id: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        let Some(dialog) = dialog(id) else {
            return false;
        };
        dialog.close();
        true
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}
