use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h3 { (title) }
            (body)
        }
    }
}

pub fn metric_card(label: &str, value: &str) -> Markup {
    html! {
        div class="metric-card" {
            div { (label) }
            div class="value" { (value) }
        }
    }
}
