use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = "
body { font-family: system-ui, sans-serif; margin: 0; color: #31333f; }
header { display: flex; align-items: center; justify-content: space-between; padding: 0.75rem 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
header h3 { margin: 0; }
header nav ul { display: flex; gap: 1.25rem; list-style: none; margin: 0; padding: 0; }
main.container { max-width: 1100px; margin: 0 auto; padding: 1rem 1.5rem; }
.card { background: #f0f2f6; padding: 20px; border-radius: 10px; box-shadow: 2px 2px 5px rgba(0,0,0,0.05); margin-bottom: 2rem; }
.metric-row { display: flex; gap: 1rem; margin-bottom: 2rem; }
.metric-card { flex: 1; background: #f0f2f6; padding: 20px; border-radius: 10px; }
.metric-card .value { font-size: 1.6rem; font-weight: 700; }
table { width: 100%; border-collapse: collapse; }
th { padding: 10px 8px; border-bottom: 2px solid #e5e7eb; text-align: left; }
td { padding: 8px; border-bottom: 1px solid #f3f4f6; }
button { background-color: #03c75a; color: white; border: none; border-radius: 4px; padding: 8px 16px; cursor: pointer; }
input, select { padding: 8px; border: 1px solid #ccc; border-radius: 4px; }
.notice { padding: 10px; border-radius: 5px; background-color: #f0f2f6; border: 1px solid #d6d6d6; }
.warn { padding: 10px; border-radius: 5px; background: #fef2f2; border: 1px solid #dc2626; color: #991b1b; }
";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                header {
                    h3 { "🏢 네이버 부동산 매물 수집기" }
                    nav {
                        ul {
                            li { a href="/" { "대시보드" } }
                            li { a href="/admin" { "관리" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
