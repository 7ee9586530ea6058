use maud::{DOCTYPE, Markup, Render, html};

pub const PRIMARY_BUTTON: &str = "bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded";
pub const SECONDARY_BUTTON: &str = "bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded";
pub const DANGER_BUTTON: &str = "bg-red-600 hover:bg-red-800 font-bold py-2 px-4 rounded";

const INPUT_CLASSES: &str = "shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600";

///the page shell: htmx with its SSE extension, and tailwind
pub fn render_page(markup: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                title { "Student Directory" }
            }
            body hx-ext="sse" class="bg-gray-900 min-h-screen flex flex-col items-center py-8 text-white" {
                (markup)
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h3 class="text-xl font-semibold mb-4" {(s)}
    }
}

///a paragraph standing in for content that isn't there
pub fn notice(s: impl Render) -> Markup {
    html! {
        p class="italic text-gray-400" {(s)}
    }
}

pub fn form_element(id: &'static str, label: &'static str, element: Markup) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (element)
        }
    }
}

pub fn simple_form_element(
    id: &'static str,
    name: &'static str,
    label: &'static str,
    ty: Option<&'static str>,
    value: &str,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required type=(ty.unwrap_or("text")) id=(id) name=(name) value=(value) class=(INPUT_CLASSES);
        },
    )
}

pub fn select_element<'a>(
    id: &'static str,
    name: &'static str,
    placeholder: (&'static str, &'static str),
    options: impl IntoIterator<Item = (&'a str, String)>,
    selected: &str,
) -> Markup {
    html! {
        select id=(id) name=(name) class=(INPUT_CLASSES) {
            option value=(placeholder.0) selected[selected == placeholder.0] {(placeholder.1)}
            @for (value, label) in options {
                option value=(value) selected[selected == value] {(label)}
            }
        }
    }
}
