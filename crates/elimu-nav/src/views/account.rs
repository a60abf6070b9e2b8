//! Sign-in and account creation forms.

use super::ViewContext;
use crate::view::{Element, VIEW_ATTR, el, nav_link};

const INPUT_CLASS: &str =
    "w-full border rounded px-4 py-2 focus:outline-none focus:ring-2 focus:ring-[#5624d0]";
const SUBMIT_CLASS: &str =
    "w-full bg-[#5624d0] text-white py-2 rounded hover:bg-purple-800 transition";

fn field(label: &str, id: &'static str, kind: &'static str, placeholder: &str) -> Element {
    el("div")
        .child(
            el("label")
                .class("block mb-1 text-sm font-medium text-gray-700")
                .attr("for", id)
                .text(label),
        )
        .child(
            el("input")
                .id(id)
                .attr("name", id)
                .attr("type", kind)
                .attr("placeholder", placeholder)
                .attr("required", "required")
                .class(INPUT_CLASS),
        )
}

fn card(view: &'static str, heading: &str, form: Element) -> Element {
    el("section")
        .class("min-h-screen bg-gray-100 flex items-center justify-center px-4")
        .attr(VIEW_ATTR, view)
        .child(
            el("div")
                .class("w-full max-w-md bg-white p-8 rounded shadow-md")
                .child(
                    el("h2")
                        .class("text-2xl font-bold mb-6 text-center text-[#5624d0]")
                        .text(heading),
                )
                .child(form),
        )
}

fn switch_prompt(question: &str, href: &str, label: &str) -> Element {
    el("p")
        .class("text-sm text-center mt-4 text-gray-600")
        .text(format!("{question} "))
        .child(nav_link(href, label).class("text-[#5624d0] hover:underline"))
}

/// Sign-in form. Shows who is signed in when a session exists.
#[must_use]
pub fn login(ctx: &ViewContext) -> Element {
    let mut form = el("form")
        .class("space-y-4")
        .attr("data-form", "login")
        .child(field("Email", "email", "email", "example@email.com"))
        .child(field("Password", "password", "password", "********"))
        .child(
            el("button")
                .attr("type", "submit")
                .class(SUBMIT_CLASS)
                .text("Login"),
        )
        .child(switch_prompt(
            "Don\u{2019}t have an account?",
            "/signup",
            "Sign Up",
        ));

    if ctx.auth().get_token().is_some() {
        let who = ctx
            .auth()
            .current_user()
            .map(|user| user.display_name().to_string())
            .unwrap_or_else(|| "your account".to_string());
        form = form.child(
            el("p")
                .class("text-sm text-center text-green-700")
                .attr("role", "status")
                .text(format!("Signed in as {who}. "))
                .child(nav_link("/dashboard", "Go to dashboard")),
        );
    }

    card("login", "Login to Your Account", form)
}

/// Account creation form.
#[must_use]
pub fn signup() -> Element {
    let form = el("form")
        .class("space-y-4")
        .attr("data-form", "signup")
        .child(field("Full Name", "name", "text", "Your Name"))
        .child(field("Email", "email", "email", "example@email.com"))
        .child(field("Password", "password", "password", "********"))
        .child(
            el("button")
                .attr("type", "submit")
                .class(SUBMIT_CLASS)
                .text("Sign Up"),
        )
        .child(switch_prompt("Already have an account?", "/login", "Login"));

    card("signup", "Create an Account", form)
}
