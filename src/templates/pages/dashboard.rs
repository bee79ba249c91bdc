use maud::{html, Markup};

use crate::analysis::{CollectionRun, LatestMetrics};
use crate::domain::aggregate::{AggregateResult, RealtorActivity};
use crate::domain::diff::DiffEvent;
use crate::domain::price::format_eok;
use crate::domain::record::ListingRecord;
use crate::domain::snapshot::SNAPSHOT_TIME_FORMAT;
use crate::domain::unit_type::BandLowest;
use crate::templates::components::{card, metric_card};
use crate::templates::{desktop_layout, urlencode};

pub struct DashboardVm {
    pub scope: String,
    pub complexes: Vec<String>,
    pub metrics: LatestMetrics,
    pub window_days: i64,
    pub aggregate: AggregateResult,
    pub lowest: Vec<BandLowest>,
    pub history: Vec<CollectionRun>,
    /// Latest snapshot, price descending.
    pub latest: Vec<ListingRecord>,
}

pub fn dashboard_page(vm: &DashboardVm) -> Markup {
    desktop_layout(
        "네이버 부동산 매물 분석",
        html! {
            main class="container" {
                h1 { "🏢 " (vm.scope) " 매물 분석" }
                (scope_picker(vm))
                (metric_row(&vm.metrics))
                (card("📈 주간 활동 집계", weekly_body(vm)))
                (card("💰 타입별 최저가 (최신)", lowest_table(&vm.lowest)))
                (card("📋 수집 이력", history_table(&vm.scope, &vm.history)))
                (card("📑 상세 수집 기록 (최신)", records_table(&vm.latest)))
                p {
                    a href=(format!("/export?complex={}", urlencode(&vm.scope))) {
                        "💾 데이터 다운로드 (XLSX)"
                    }
                }
            }
        },
    )
}

pub fn dashboard_empty_page() -> Markup {
    desktop_layout(
        "네이버 부동산 매물 분석",
        html! {
            main class="container" {
                h1 { "🏢 네이버 부동산 매물 수집 및 분석 도구" }
                p { "허위매물 의심 사례 수집을 위한 데이터 수집 및 분석 도구입니다." }
                p class="notice" { "수집된 데이터가 없습니다. 관리 페이지에서 수집을 시작해주세요." }
                p { a href="/admin" { "관리 페이지로 이동" } }
            }
        },
    )
}

fn scope_picker(vm: &DashboardVm) -> Markup {
    html! {
        form action="/" method="get" style="display: flex; gap: 10px; align-items: center; margin-bottom: 1.5rem;" {
            label for="complex" { "단지 선택" }
            select name="complex" id="complex" {
                @for name in &vm.complexes {
                    option value=(name) selected[*name == vm.scope] { (name) }
                }
            }
            button type="submit" { "조회" }
        }
    }
}

fn metric_row(metrics: &LatestMetrics) -> Markup {
    let average = if metrics.average_price > 0.0 {
        format!("{:.2} 억", metrics.average_price / 100_000_000.0)
    } else {
        "0 억".to_string()
    };
    let new_count = if metrics.new_count > 0 {
        format!("+{}", metrics.new_count)
    } else {
        metrics.new_count.to_string()
    };

    html! {
        div class="metric-row" {
            (metric_card("현재 매물 수 (최신)", &format!("{} 건", metrics.listing_count)))
            (metric_card("평균 가격 (최신)", &average))
            (metric_card("신규 매물 (이전 대비)", &new_count))
        }
    }
}

fn weekly_body(vm: &DashboardVm) -> Markup {
    let agg = &vm.aggregate;
    html! {
        p {
            "최근 " (vm.window_days) "일간 신규 " strong { (agg.total_appeared) } "건, 소멸 "
            strong { (agg.total_disappeared) } "건"
            @if !agg.skipped.is_empty() {
                span style="color: #dc2626;" {
                    " (급변 감지로 " (agg.skipped.len()) "건 집계 제외)"
                }
            }
        }
        div style="display: flex; gap: 2rem;" {
            div style="flex: 1;" {
                h4 { "중개사별 신규 매물 TOP" }
                (ranking_table(&agg.top_appearing))
            }
            div style="flex: 1;" {
                h4 { "중개사별 소멸 매물 TOP" }
                (ranking_table(&agg.top_disappearing))
            }
        }
        h4 { "구간별 변동" }
        @if agg.events.is_empty() {
            p { "집계 구간 내 변동 내역이 없습니다." }
        } @else {
            table {
                thead {
                    tr { th { "수집 시점" } th { "신규" } th { "소멸" } th {} }
                }
                tbody {
                    @for event in &agg.events {
                        tr {
                            td { (event.to_time.format(SNAPSHOT_TIME_FORMAT)) }
                            td { "+" (event.appeared.len()) }
                            td { "-" (event.disappeared.len()) }
                            td { a href=(diff_href(&vm.scope, event)) { "상세" } }
                        }
                    }
                }
            }
        }
    }
}

fn ranking_table(rows: &[RealtorActivity]) -> Markup {
    html! {
        @if rows.is_empty() {
            p { "내역 없음" }
        } @else {
            table {
                thead { tr { th { "순위" } th { "중개사명" } th { "매물수" } } }
                tbody {
                    @for (i, row) in rows.iter().enumerate() {
                        tr {
                            td { (i + 1) }
                            td { (row.realtor_name) }
                            td { (row.count) }
                        }
                    }
                }
            }
        }
    }
}

fn lowest_table(bands: &[BandLowest]) -> Markup {
    html! {
        @if bands.is_empty() {
            p { "타입별 매물이 없습니다." }
        } @else {
            table {
                thead {
                    tr { th { "타입" } th { "최저가" } th { "대표 매물" } th { "동일가 매물수" } }
                }
                tbody {
                    @for band in bands {
                        tr {
                            td { (band.band.label()) "타입" }
                            td {
                                (band.representative.price_display)
                                " (" (format_eok(band.lowest_price)) ")"
                            }
                            td {
                                (band.representative.building_label) " "
                                (band.representative.floor_info)
                            }
                            td { (band.tied.len()) "건" }
                        }
                    }
                }
            }
        }
    }
}

fn history_table(scope: &str, history: &[CollectionRun]) -> Markup {
    html! {
        @if history.is_empty() {
            p { "수집 이력이 없습니다." }
        } @else {
            table {
                thead { tr { th { "수집 시점" } th { "매물 수" } th {} } }
                tbody {
                    @for run in history {
                        tr {
                            td { (run.taken_at.format(SNAPSHOT_TIME_FORMAT)) }
                            td { (run.count) " 건" }
                            td {
                                a href=(format!(
                                    "/diff?complex={}&to={}",
                                    urlencode(scope),
                                    urlencode(&run.taken_at.format(SNAPSHOT_TIME_FORMAT).to_string())
                                )) { "상세" }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(crate) fn records_table(records: &[ListingRecord]) -> Markup {
    html! {
        @if records.is_empty() {
            p { "표시할 매물이 없습니다." }
        } @else {
            div style="overflow-x: auto;" {
                table {
                    thead {
                        tr {
                            th { "매물번호" } th { "동" } th { "층" } th { "전용면적(㎡)" }
                            th { "가격" } th { "방향" } th { "중개사" } th { "특징" }
                        }
                    }
                    tbody {
                        @for record in records {
                            tr {
                                td { (record.listing_id) }
                                td { (record.building_label) }
                                td { (record.floor_info) }
                                td { (record.area_exclusive) }
                                td { (record.price_display) }
                                td { (record.direction) }
                                td { (record.realtor_name) }
                                td { (record.feature_description) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn diff_href(scope: &str, event: &DiffEvent) -> String {
    format!(
        "/diff?complex={}&to={}",
        urlencode(scope),
        urlencode(&event.to_time.format(SNAPSHOT_TIME_FORMAT).to_string())
    )
}
