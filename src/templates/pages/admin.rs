use maud::{html, Markup};

use crate::analysis::{CollectionRun, StoreTotals};
use crate::domain::snapshot::SNAPSHOT_TIME_FORMAT;
use crate::scheduler::SchedulerStatus;
use crate::templates::components::{card, metric_card};
use crate::templates::desktop_layout;

pub struct AdminVm {
    pub totals: StoreTotals,
    /// Whole-store collection log, most recent first.
    pub history: Vec<CollectionRun>,
    pub status: SchedulerStatus,
    pub complex_no: String,
    pub trade_type: String,
    pub interval_min: u64,
}

pub fn admin_page(vm: &AdminVm) -> Markup {
    let latest = vm
        .totals
        .latest_collection
        .map(|t| t.format(SNAPSHOT_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    desktop_layout(
        "수집 서버 관리",
        html! {
            main class="container" {
                h1 { "🤖 부동산 데이터 수집 서버" }
                p { "자동 수집 스케줄러 및 데이터 관리자입니다." }

                div class="metric-row" {
                    (metric_card("총 수집 데이터 건수", &format!("{} 건", vm.totals.record_count)))
                    (metric_card("최근 수집 시각", &latest))
                    (metric_card("수집 단지 수", &format!("{} 개", vm.totals.complex_count)))
                }

                (card("⏱ 자동 수집 스케줄러", scheduler_body(vm)))
                (card("📋 수집 이력 로그", history_table(&vm.history)))
                (card("⚠️ 데이터 관리", danger_body()))
            }
        },
    )
}

fn scheduler_body(vm: &AdminVm) -> Markup {
    let status = &vm.status;
    let icon = if status.running { "🟢" } else { "🔴" };
    let label = if status.running { "자동 수집 활성화" } else { "자동 수집 중지" };

    html! {
        p {
            strong { "상태: " } (icon) " " (label)
            @if let Some(config) = &status.config {
                @if status.running {
                    " — 단지 " (config.complex_no) " (" (config.trade_type) ") · "
                    (config.interval_min) "분 주기"
                }
            }
        }
        p {
            "최근 실행 시각: " (format_run(&status.last_run))
            " · 다음 실행 시각: " (format_run(&status.next_run))
        }
        @if let Some(result) = &status.last_result {
            p { "마지막 결과: " (result) }
        }

        form action="/scheduler/start" method="post" style="display: flex; gap: 10px; align-items: center; flex-wrap: wrap; margin-bottom: 0.75rem;" {
            input type="text" name="complex_no" value=(vm.complex_no) required
                title="단지 식별 번호 (hscpNo)";
            (trade_type_select(&vm.trade_type))
            input type="number" name="interval_min" value=(vm.interval_min)
                min="1" max="1440" required style="width: 90px;";
            input type="password" name="key" placeholder="관리자 키" required;
            button type="submit" { "🚀 수집 시작" }
        }
        form action="/scheduler/stop" method="post" style="display: flex; gap: 10px; align-items: center; margin-bottom: 0.75rem;" {
            input type="password" name="key" placeholder="관리자 키" required;
            button type="submit" style="background-color: #dc2626;" { "🛑 수집 중지" }
        }
        form action="/collect" method="post" style="display: flex; gap: 10px; align-items: center;" {
            input type="text" name="complex_no" value=(vm.complex_no) required;
            (trade_type_select(&vm.trade_type))
            input type="password" name="key" placeholder="관리자 키" required;
            button type="submit" { "📥 지금 한 번 수집" }
        }
    }
}

fn trade_type_select(current: &str) -> Markup {
    html! {
        select name="trade_type" {
            option value="A1" selected[current == "A1"] { "매매 (Sale)" }
            option value="B1" selected[current == "B1"] { "전세 (Jeonse)" }
            option value="B2" selected[current == "B2"] { "월세 (Rent)" }
        }
    }
}

fn format_run(at: &Option<chrono::NaiveDateTime>) -> String {
    at.map(|t| t.format(SNAPSHOT_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn history_table(history: &[CollectionRun]) -> Markup {
    html! {
        @if history.is_empty() {
            p { "수집된 데이터가 없습니다." }
        } @else {
            table {
                thead { tr { th { "수집 시점" } th { "매물 수" } } }
                tbody {
                    @for run in history {
                        tr {
                            td { (run.taken_at.format(SNAPSHOT_TIME_FORMAT)) }
                            td { (run.count) " 건" }
                        }
                    }
                }
            }
        }
    }
}

fn danger_body() -> Markup {
    html! {
        form action="/clear" method="post"
            onsubmit="return confirm('해당 단지의 모든 수집 데이터를 삭제할까요?');"
            style="display: flex; gap: 10px; align-items: center;" {
            input type="text" name="complex" placeholder="단지명" required;
            input type="password" name="key" placeholder="관리자 키" required;
            button type="submit" style="background-color: #dc2626;" { "🗑️ 데이터 삭제" }
        }
    }
}
