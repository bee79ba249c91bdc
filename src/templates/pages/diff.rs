use maud::{html, Markup};

use crate::analysis::DiffDetail;
use crate::domain::snapshot::SNAPSHOT_TIME_FORMAT;
use crate::templates::components::card;
use crate::templates::pages::dashboard::records_table;
use crate::templates::{desktop_layout, urlencode};

pub struct DiffVm {
    pub scope: String,
    pub detail: DiffDetail,
}

pub fn diff_page(vm: &DiffVm) -> Markup {
    let event = &vm.detail.event;
    desktop_layout(
        "스냅샷 비교",
        html! {
            main class="container" {
                h1 { "🔍 " (vm.scope) " 스냅샷 비교" }
                p {
                    @match event.from_time {
                        Some(from) => {
                            (from.format(SNAPSHOT_TIME_FORMAT))
                            " → "
                            (event.to_time.format(SNAPSHOT_TIME_FORMAT))
                        }
                        None => {
                            "기준 스냅샷 (이전 수집 없음) → "
                            (event.to_time.format(SNAPSHOT_TIME_FORMAT))
                        }
                    }
                }
                @if vm.detail.anomalous {
                    p class="warn" {
                        "⚠️ 급변 감지: 신규/소멸 건수가 임계치를 초과하여 주간 집계에서 제외된 이벤트입니다."
                    }
                }
                (card(
                    &format!("🆕 신규 매물 ({})", vm.detail.appeared.len()),
                    records_table(&vm.detail.appeared),
                ))
                (card(
                    &format!("💨 소멸 매물 ({})", vm.detail.disappeared.len()),
                    records_table(&vm.detail.disappeared),
                ))
                p {
                    a href=(format!("/?complex={}", urlencode(&vm.scope))) { "← 대시보드로" }
                }
            }
        },
    )
}
