use maud::{Markup, Render, html};

pub fn render_table<const N: usize>(
    overall_title: &'static str,
    titles: [&'static str; N],
    items: Vec<[Markup; N]>,
) -> Markup {
    html! {
        section {
            (subtitle(overall_title))
            table {
                thead {
                    tr {
                        @for title in titles {
                            th {(title)}
                        }
                    }
                }
                tbody {
                    @for row in items {
                        tr {
                            @for col in row {
                                td {(col)}
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 {(s)}
    }
}

pub fn subtitle(s: impl Render) -> Markup {
    html! {
        h2 {(s)}
    }
}

pub fn code(s: impl Render) -> Markup {
    html! {
        code {(s)}
    }
}
