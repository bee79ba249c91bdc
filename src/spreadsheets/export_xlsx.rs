use crate::domain::record::ListingRecord;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::Workbook;

/// Full scope history as a spreadsheet, one row per stored record. The raw
/// price string and the parsed amount are exported side by side so evidence
/// survives even when parsing was wrong.
pub fn export_records_xlsx(records: &[ListingRecord]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let headers = [
        "수집시각",
        "매물번호",
        "단지",
        "동",
        "층",
        "방향",
        "공급면적(㎡)",
        "전용면적(㎡)",
        "가격",
        "가격(원)",
        "중개사",
        "거래유형",
        "확인일자",
        "특징",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{header}': {e}"))
            })?;
    }

    for (i, record) in records.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &record.snapshot_time)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 1, &record.listing_id)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 2, &record.complex_name)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 3, &record.building_label)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 4, &record.floor_info)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 5, &record.direction)
            .map_err(xlsx_err)?;
        if let Some(area) = record.area_supply {
            worksheet.write_number(r, 6, area).map_err(xlsx_err)?;
        }
        worksheet
            .write_number(r, 7, record.area_exclusive)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 8, &record.price_display)
            .map_err(xlsx_err)?;
        worksheet
            .write_number(r, 9, record.price_amount as f64)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 10, &record.realtor_name)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 11, &record.trade_type)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 12, &record.confirmed_date)
            .map_err(xlsx_err)?;
        worksheet
            .write_string(r, 13, &record.feature_description)
            .map_err(xlsx_err)?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, "naver_land_evidence.xlsx")
}

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> ServerError {
    ServerError::XlsxError(e.to_string())
}
