//! 画像選択コンポーネント
//!
//! 1枚の画像を選択してData URLに変換する。未選択なら何もしない。

use leptos::prelude::*;
use ocr_address_common::UploadedImage;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea<F>(on_image_selected: F) -> impl IntoView
where
    F: Fn(UploadedImage) + 'static + Clone + Send,
{
    let on_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            read_file(file, on_image_selected.clone());
        }
    };

    view! {
        <div class="upload-area">
            <input type="file" accept="image/*" on:change=on_change />
        </div>
    }
}

fn read_file<F>(file: File, on_image_selected: F)
where
    F: Fn(UploadedImage) + 'static,
{
    let Ok(reader) = FileReader::new() else {
        gloo::console::error!("FileReaderを作成できません");
        return;
    };

    let file_name = file.name();
    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        if let Ok(result) = reader_clone.result() {
            if let Some(data_url) = result.as_string() {
                on_image_selected(UploadedImage::new(file_name.clone(), data_url));
            }
        }
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        gloo::console::error!("画像の読み込みに失敗:", e);
    }
}
