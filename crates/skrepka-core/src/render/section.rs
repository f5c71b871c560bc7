//! # Section Descriptors
//!
//! Each document type is described as an ordered list of [`Section`]
//! values built by a small per-type builder. The layout engine consumes
//! the list without knowing which document type produced it, so adding a
//! document type means adding one builder function, not touching layout
//! or PDF code.
//!
//! ```text
//!   DocumentPayload ──┬── invoice_sections ────┐
//!                     ├── waybill_sections ────┼──► Vec<Section> ──► layout
//!                     └── act_sections ────────┘
//! ```
//!
//! Descriptors carry pre-stringified content: all number/date/money
//! formatting happens here, not in the engine.

use chrono::NaiveDate;

use crate::items::{CalculatedLines, DocumentTotals};
use crate::render::format::{format_date_ru, format_money, format_quantity, format_vat_rate};
use crate::types::{
    CompletionActData, DocumentPayload, InvoiceData, PartyInfo, WaybillData,
};

// =============================================================================
// Descriptor Types
// =============================================================================

/// Horizontal alignment inside a column or text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
    Right,
}

/// One column of an item table.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub header: &'static str,
    pub width: f32,
    pub align: Align,
}

/// One signature line: a caption and an optional pre-filled signer name.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SignatureSlot {
    pub caption: String,
    pub name: Option<String>,
}

/// A layout-level building block of a rendered document.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Section {
    /// Centered document header: bold title, optional subtitle, date line.
    Header {
        title: String,
        subtitle: Option<String>,
        date_line: String,
    },
    /// One party: bold label + name line, then requisite detail lines.
    PartyBlock {
        label: String,
        name: String,
        details: Vec<String>,
    },
    /// Plain reference lines (contract basis, service period).
    ReferenceBlock { lines: Vec<String> },
    /// Grid of pre-stringified cells under a fixed column set.
    ItemTable {
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
    },
    /// Right-hand label/value lines; the last line renders emphasized.
    TotalsBlock { lines: Vec<(String, String)> },
    /// Item-count/total summary plus the spelled-out total.
    AmountInWords { summary: String, words: String },
    /// A free paragraph, optionally introduced by a label.
    FreeText {
        label: Option<String>,
        body: String,
    },
    /// Signature lines; `paired` renders slots two per row.
    SignatureBlock {
        slots: Vec<SignatureSlot>,
        paired: bool,
    },
    /// Fixed vertical gap.
    Spacer { points: f32 },
}

// =============================================================================
// Builder Dispatch
// =============================================================================

/// Builds the section list for a payload. `lines` must come from the
/// calculator for the same payload; `amount_in_words` spells its total.
pub(crate) fn build_sections(
    payload: &DocumentPayload,
    lines: &CalculatedLines,
    number: &str,
    amount_in_words: &str,
) -> Vec<Section> {
    match payload {
        DocumentPayload::Invoice(data) => invoice_sections(data, lines, number, amount_in_words),
        DocumentPayload::Waybill(data) => waybill_sections(data, lines, number, amount_in_words),
        DocumentPayload::CompletionAct(data) => act_sections(data, lines, number, amount_in_words),
    }
}

// =============================================================================
// Invoice (счёт на оплату)
// =============================================================================

fn invoice_sections(
    data: &InvoiceData,
    lines: &CalculatedLines,
    number: &str,
    amount_in_words: &str,
) -> Vec<Section> {
    let show_vat = data.include_vat;
    let total = format_money(lines.totals.total);

    let mut sections = vec![
        Section::Header {
            title: format!("СЧЁТ НА ОПЛАТУ № {number}"),
            subtitle: None,
            date_line: format!("от {}", format_date_ru(data.invoice_date)),
        },
        Section::Spacer { points: 10.0 },
        party_block("Поставщик:", &data.seller),
        Section::Spacer { points: 6.0 },
        party_block("Покупатель:", &data.buyer),
        Section::Spacer { points: 10.0 },
        item_table(lines, show_vat),
        totals_block(&lines.totals, show_vat),
        Section::Spacer { points: 6.0 },
        Section::AmountInWords {
            summary: format!(
                "Всего наименований {}, на сумму {} руб.",
                lines.items.len(),
                total
            ),
            words: amount_in_words.to_string(),
        },
    ];

    if let Some(notes) = &data.notes {
        sections.push(Section::Spacer { points: 6.0 });
        sections.push(Section::FreeText {
            label: Some("Примечание".to_string()),
            body: notes.clone(),
        });
    }
    if let Some(due) = data.due_date {
        sections.push(Section::Spacer { points: 4.0 });
        sections.push(Section::FreeText {
            label: Some("Срок оплаты".to_string()),
            body: format_date_ru(due),
        });
    }

    sections.push(Section::Spacer { points: 20.0 });
    sections.push(Section::SignatureBlock {
        slots: vec![
            SignatureSlot {
                caption: "Руководитель".to_string(),
                name: data.seller.signer_director.clone(),
            },
            SignatureSlot {
                caption: "Главный бухгалтер".to_string(),
                name: data.seller.signer_accountant.clone(),
            },
        ],
        paired: false,
    });
    sections.push(Section::Spacer { points: 8.0 });
    sections.push(Section::FreeText {
        label: None,
        body: "М.П.".to_string(),
    });

    sections
}

// =============================================================================
// Waybill (товарная накладная)
// =============================================================================

fn waybill_sections(
    data: &WaybillData,
    lines: &CalculatedLines,
    number: &str,
    amount_in_words: &str,
) -> Vec<Section> {
    let total = format_money(lines.totals.total);

    let mut sections = vec![
        Section::Header {
            title: format!("ТОВАРНАЯ НАКЛАДНАЯ № {number}"),
            subtitle: None,
            date_line: format!("от {}", format_date_ru(data.waybill_date)),
        },
        Section::Spacer { points: 10.0 },
        party_block("Поставщик:", &data.seller),
        Section::Spacer { points: 6.0 },
        party_block("Покупатель:", &data.buyer),
    ];

    // Shipper/consignee repeat the main parties in the common case, so
    // they print only when they actually differ by name.
    if let Some(shipper) = &data.shipper {
        if shipper.name != data.seller.name {
            sections.push(Section::Spacer { points: 6.0 });
            sections.push(party_block("Грузоотправитель:", shipper));
        }
    }
    if let Some(consignee) = &data.consignee {
        if consignee.name != data.buyer.name {
            sections.push(Section::Spacer { points: 6.0 });
            sections.push(party_block("Грузополучатель:", consignee));
        }
    }

    if let Some(reference) = contract_reference(data.contract_number.as_deref(), data.contract_date)
    {
        sections.push(Section::Spacer { points: 6.0 });
        sections.push(Section::ReferenceBlock {
            lines: vec![reference],
        });
    }

    sections.push(Section::Spacer { points: 10.0 });
    sections.push(item_table(lines, true));
    sections.push(totals_block(&lines.totals, true));
    sections.push(Section::Spacer { points: 6.0 });
    sections.push(Section::AmountInWords {
        summary: format!(
            "Всего отпущено {} наименований на сумму {} руб.",
            lines.items.len(),
            total
        ),
        words: amount_in_words.to_string(),
    });

    if let Some(transport) = &data.transport_info {
        sections.push(Section::Spacer { points: 6.0 });
        sections.push(Section::FreeText {
            label: Some("Транспортная информация".to_string()),
            body: transport.clone(),
        });
    }

    sections.push(Section::Spacer { points: 20.0 });
    sections.push(Section::SignatureBlock {
        slots: vec![
            SignatureSlot {
                caption: "Отпуск разрешил:".to_string(),
                name: data.seller.signer_director.clone(),
            },
            SignatureSlot {
                caption: "Груз принял:".to_string(),
                name: None,
            },
        ],
        paired: false,
    });

    sections
}

// =============================================================================
// Completion Act (акт выполненных работ)
// =============================================================================

fn act_sections(
    data: &CompletionActData,
    lines: &CalculatedLines,
    number: &str,
    amount_in_words: &str,
) -> Vec<Section> {
    let show_vat = lines.has_vat();
    let total = format_money(lines.totals.total);

    let mut sections = vec![
        Section::Header {
            title: format!("АКТ № {number}"),
            subtitle: Some("о приёмке выполненных работ (оказанных услуг)".to_string()),
            date_line: format!("от {}", format_date_ru(data.act_date)),
        },
        Section::Spacer { points: 10.0 },
        party_block("Исполнитель:", &data.executor),
        Section::Spacer { points: 6.0 },
        party_block("Заказчик:", &data.customer),
    ];

    let mut references = Vec::new();
    if let Some(reference) = contract_reference(data.contract_number.as_deref(), data.contract_date)
    {
        references.push(reference);
    }
    if let Some(period) = service_period(data.period_start, data.period_end) {
        references.push(period);
    }
    if !references.is_empty() {
        sections.push(Section::Spacer { points: 6.0 });
        sections.push(Section::ReferenceBlock { lines: references });
    }

    sections.push(Section::Spacer { points: 10.0 });
    sections.push(item_table(lines, show_vat));
    sections.push(totals_block(&lines.totals, show_vat));
    sections.push(Section::Spacer { points: 6.0 });
    sections.push(Section::AmountInWords {
        summary: format!(
            "Итого оказано услуг (выполнено работ) на сумму: {} руб.",
            total
        ),
        words: amount_in_words.to_string(),
    });

    sections.push(Section::Spacer { points: 8.0 });
    sections.push(Section::FreeText {
        label: None,
        body: "Вышеперечисленные работы (услуги) выполнены полностью и в срок. \
               Заказчик претензий по объёму, качеству и срокам оказания услуг не имеет."
            .to_string(),
    });

    sections.push(Section::Spacer { points: 20.0 });
    sections.push(Section::SignatureBlock {
        slots: vec![
            SignatureSlot {
                caption: "ИСПОЛНИТЕЛЬ:".to_string(),
                name: data.executor.signer_director.clone(),
            },
            SignatureSlot {
                caption: "ЗАКАЗЧИК:".to_string(),
                name: data.customer.signer_director.clone(),
            },
        ],
        paired: true,
    });

    sections
}

// =============================================================================
// Shared Builders
// =============================================================================

fn party_block(label: &str, party: &PartyInfo) -> Section {
    Section::PartyBlock {
        label: label.to_string(),
        name: party.name.clone(),
        details: party_details(party),
    }
}

/// Flattens the optional requisites of a party into printable lines.
fn party_details(party: &PartyInfo) -> Vec<String> {
    let mut details = Vec::new();

    match (&party.tax_id, &party.registration_id) {
        (Some(inn), Some(kpp)) => details.push(format!("ИНН {inn}, КПП {kpp}")),
        (Some(inn), None) => details.push(format!("ИНН {inn}")),
        (None, Some(kpp)) => details.push(format!("КПП {kpp}")),
        (None, None) => {}
    }

    if let Some(address) = &party.address {
        details.push(format!("Адрес: {address}"));
    }

    if let Some(account) = &party.bank_account {
        match &party.bank_name {
            Some(bank) => details.push(format!("Р/с {account} в {bank}")),
            None => details.push(format!("Р/с {account}")),
        }
    } else if let Some(bank) = &party.bank_name {
        details.push(format!("Банк: {bank}"));
    }

    let mut bank_codes = Vec::new();
    if let Some(bik) = &party.bank_bik {
        bank_codes.push(format!("БИК {bik}"));
    }
    if let Some(corr) = &party.correspondent_account {
        bank_codes.push(format!("К/с {corr}"));
    }
    if !bank_codes.is_empty() {
        details.push(bank_codes.join(", "));
    }

    if let Some(phone) = &party.phone {
        details.push(format!("Тел.: {phone}"));
    }
    if let Some(email) = &party.email {
        details.push(format!("Email: {email}"));
    }

    details
}

fn contract_reference(number: Option<&str>, date: Option<NaiveDate>) -> Option<String> {
    let number = number?;
    match date {
        Some(date) => Some(format!(
            "Основание: Договор № {} от {}",
            number,
            format_date_ru(date)
        )),
        None => Some(format!("Основание: Договор № {}", number)),
    }
}

fn service_period(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<String> {
    match (start, end) {
        (Some(start), Some(end)) => Some(format!(
            "Период оказания услуг: с {} по {}",
            format_date_ru(start),
            format_date_ru(end)
        )),
        (Some(start), None) => Some(format!(
            "Период оказания услуг: с {}",
            format_date_ru(start)
        )),
        (None, Some(end)) => Some(format!("Период оказания услуг: по {}", format_date_ru(end))),
        (None, None) => None,
    }
}

/// Column set: the base five columns, plus the two VAT columns when shown.
/// Widths sum to the content width of an A4 page with 50pt side margins.
fn item_columns(show_vat: bool) -> Vec<Column> {
    if show_vat {
        vec![
            Column { header: "№", width: 28.0, align: Align::Center },
            Column { header: "Наименование", width: 172.28, align: Align::Left },
            Column { header: "Ед.", width: 40.0, align: Align::Center },
            Column { header: "Кол-во", width: 55.0, align: Align::Right },
            Column { header: "НДС, %", width: 45.0, align: Align::Center },
            Column { header: "Сумма НДС", width: 70.0, align: Align::Right },
            Column { header: "Сумма", width: 85.0, align: Align::Right },
        ]
    } else {
        vec![
            Column { header: "№", width: 28.0, align: Align::Center },
            Column { header: "Наименование", width: 267.28, align: Align::Left },
            Column { header: "Ед.", width: 45.0, align: Align::Center },
            Column { header: "Кол-во", width: 65.0, align: Align::Right },
            Column { header: "Сумма", width: 90.0, align: Align::Right },
        ]
    }
}

fn item_table(lines: &CalculatedLines, show_vat: bool) -> Section {
    let rows = lines
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let name = match &item.description {
                Some(description) => format!("{} ({})", item.name, description),
                None => item.name.clone(),
            };
            let mut row = vec![
                (idx + 1).to_string(),
                name,
                item.unit.clone(),
                format_quantity(item.quantity),
            ];
            if show_vat {
                row.push(match item.vat_rate {
                    Some(rate) => format_vat_rate(rate),
                    None => "Без НДС".to_string(),
                });
                row.push(match item.vat_amount {
                    Some(amount) => format_money(amount),
                    None => "-".to_string(),
                });
            }
            row.push(format_money(item.line_total));
            row
        })
        .collect();

    Section::ItemTable {
        columns: item_columns(show_vat),
        rows,
    }
}

fn totals_block(totals: &DocumentTotals, show_vat: bool) -> Section {
    let mut lines = Vec::new();
    if show_vat {
        lines.push(("Итого без НДС:".to_string(), format_money(totals.subtotal)));
        lines.push(("В т.ч. НДС:".to_string(), format_money(totals.total_vat)));
    }
    lines.push((
        "ИТОГО:".to_string(),
        format!("{} руб.", format_money(totals.total)),
    ));
    Section::TotalsBlock { lines }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::calculate_items;
    use crate::types::LineItem;

    fn item(name: &str, qty: f64, price: f64, vat: Option<f64>) -> LineItem {
        LineItem {
            name: name.to_string(),
            description: None,
            unit: "шт".to_string(),
            quantity: qty,
            unit_price: price,
            vat_rate: vat,
            vat_amount: None,
            line_total: None,
        }
    }

    fn party(name: &str) -> PartyInfo {
        PartyInfo {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn invoice(include_vat: bool, vat: Option<f64>) -> (InvoiceData, CalculatedLines) {
        let data = InvoiceData {
            seller: party("ООО Ромашка"),
            buyer: party("ИП Петров"),
            items: vec![item("Товар А", 2.0, 100.0, vat), item("Товар Б", 1.0, 100.0, vat)],
            invoice_date: date(),
            due_date: None,
            notes: None,
            include_vat,
        };
        let lines = calculate_items(&data.items).unwrap();
        (data, lines)
    }

    fn find_table(sections: &[Section]) -> (&Vec<Column>, &Vec<Vec<String>>) {
        sections
            .iter()
            .find_map(|s| match s {
                Section::ItemTable { columns, rows } => Some((columns, rows)),
                _ => None,
            })
            .expect("section list should contain an item table")
    }

    fn find_totals(sections: &[Section]) -> &Vec<(String, String)> {
        sections
            .iter()
            .find_map(|s| match s {
                Section::TotalsBlock { lines } => Some(lines),
                _ => None,
            })
            .expect("section list should contain a totals block")
    }

    #[test]
    fn test_invoice_without_vat_uses_five_columns() {
        let (data, lines) = invoice(false, None);
        let sections = invoice_sections(&data, &lines, "INV-202501-0001", "слова");

        let (columns, rows) = find_table(&sections);
        assert_eq!(columns.len(), 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["1", "Товар А", "шт", "2", "200,00"]);

        let totals = find_totals(&sections);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].0, "ИТОГО:");
        assert_eq!(totals[0].1, "300,00 руб.");
    }

    #[test]
    fn test_invoice_with_vat_adds_exactly_two_columns() {
        let (data, lines) = invoice(true, Some(20.0));
        let sections = invoice_sections(&data, &lines, "INV-202501-0002", "слова");

        let (columns, rows) = find_table(&sections);
        assert_eq!(columns.len(), 7);
        let headers: Vec<&str> = columns.iter().map(|c| c.header).collect();
        assert_eq!(
            headers,
            vec!["№", "Наименование", "Ед.", "Кол-во", "НДС, %", "Сумма НДС", "Сумма"]
        );
        // 200.00 at 20% VAT-inclusive extracts 33.33
        assert_eq!(rows[0], vec!["1", "Товар А", "шт", "2", "20", "33,33", "200,00"]);

        let totals = find_totals(&sections);
        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].0, "Итого без НДС:");
        assert_eq!(totals[1].0, "В т.ч. НДС:");
        assert_eq!(totals[2].0, "ИТОГО:");
    }

    #[test]
    fn test_invoice_header_and_summary_wording() {
        let (data, lines) = invoice(false, None);
        let sections = invoice_sections(&data, &lines, "INV-202501-0001", "Триста рублей 00 копеек");

        match &sections[0] {
            Section::Header { title, subtitle, date_line } => {
                assert_eq!(title, "СЧЁТ НА ОПЛАТУ № INV-202501-0001");
                assert!(subtitle.is_none());
                assert_eq!(date_line, "от 15 января 2025 г.");
            }
            other => panic!("expected header first, got {other:?}"),
        }

        let summary = sections
            .iter()
            .find_map(|s| match s {
                Section::AmountInWords { summary, words } => Some((summary, words)),
                _ => None,
            })
            .unwrap();
        assert_eq!(summary.0, "Всего наименований 2, на сумму 300,00 руб.");
        assert_eq!(summary.1, "Триста рублей 00 копеек");
    }

    #[test]
    fn test_waybill_always_shows_vat_columns() {
        let data = WaybillData {
            seller: party("ООО Ромашка"),
            buyer: party("ИП Петров"),
            shipper: None,
            consignee: None,
            items: vec![item("Товар", 1.0, 100.0, None)],
            waybill_date: date(),
            contract_number: None,
            contract_date: None,
            transport_info: None,
        };
        let lines = calculate_items(&data.items).unwrap();
        let sections = waybill_sections(&data, &lines, "WB-202501-0001", "слова");

        let (columns, rows) = find_table(&sections);
        assert_eq!(columns.len(), 7);
        // no rate on the line: rate column spells it out, amount is a dash
        assert_eq!(rows[0][4], "Без НДС");
        assert_eq!(rows[0][5], "-");
    }

    #[test]
    fn test_waybill_same_name_shipper_suppressed() {
        let mut data = WaybillData {
            seller: party("ООО Ромашка"),
            buyer: party("ИП Петров"),
            shipper: Some(party("ООО Ромашка")),
            consignee: Some(party("ООО Склад-Восток")),
            items: vec![item("Товар", 1.0, 100.0, None)],
            waybill_date: date(),
            contract_number: Some("Д-17".to_string()),
            contract_date: Some(date()),
            transport_info: None,
        };
        let lines = calculate_items(&data.items).unwrap();
        let sections = waybill_sections(&data, &lines, "WB-202501-0001", "слова");

        let labels: Vec<&str> = sections
            .iter()
            .filter_map(|s| match s {
                Section::PartyBlock { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Поставщик:", "Покупатель:", "Грузополучатель:"]);

        let references = sections
            .iter()
            .find_map(|s| match s {
                Section::ReferenceBlock { lines } => Some(lines),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            references[0],
            "Основание: Договор № Д-17 от 15 января 2025 г."
        );

        // differing shipper prints
        data.shipper = Some(party("ООО Склад-Запад"));
        let sections = waybill_sections(&data, &lines, "WB-202501-0001", "слова");
        let labels: Vec<&str> = sections
            .iter()
            .filter_map(|s| match s {
                Section::PartyBlock { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect();
        assert!(labels.contains(&"Грузоотправитель:"));
    }

    #[test]
    fn test_act_vat_columns_follow_item_rates() {
        let base = CompletionActData {
            executor: party("ООО Ромашка"),
            customer: party("ИП Петров"),
            items: vec![item("Услуга", 1.0, 100.0, None)],
            act_date: date(),
            contract_number: None,
            contract_date: None,
            period_start: None,
            period_end: None,
        };

        let lines = calculate_items(&base.items).unwrap();
        let sections = act_sections(&base, &lines, "ACT-202501-0001", "слова");
        let (columns, _) = find_table(&sections);
        assert_eq!(columns.len(), 5);

        let mut with_vat = base.clone();
        with_vat.items = vec![item("Услуга", 1.0, 100.0, Some(20.0))];
        let lines = calculate_items(&with_vat.items).unwrap();
        let sections = act_sections(&with_vat, &lines, "ACT-202501-0001", "слова");
        let (columns, _) = find_table(&sections);
        assert_eq!(columns.len(), 7);
    }

    #[test]
    fn test_act_paired_signatures_and_period() {
        let data = CompletionActData {
            executor: PartyInfo {
                name: "ООО Ромашка".to_string(),
                signer_director: Some("Иванов И.И.".to_string()),
                ..Default::default()
            },
            customer: party("ИП Петров"),
            items: vec![item("Услуга", 1.0, 100.0, None)],
            act_date: date(),
            contract_number: None,
            contract_date: None,
            period_start: NaiveDate::from_ymd_opt(2025, 1, 1),
            period_end: NaiveDate::from_ymd_opt(2025, 1, 31),
        };
        let lines = calculate_items(&data.items).unwrap();
        let sections = act_sections(&data, &lines, "ACT-202501-0001", "слова");

        let references = sections
            .iter()
            .find_map(|s| match s {
                Section::ReferenceBlock { lines } => Some(lines),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            references[0],
            "Период оказания услуг: с 1 января 2025 г. по 31 января 2025 г."
        );

        let signature = sections
            .iter()
            .find_map(|s| match s {
                Section::SignatureBlock { slots, paired } => Some((slots, paired)),
                _ => None,
            })
            .unwrap();
        assert!(*signature.1);
        assert_eq!(signature.0[0].caption, "ИСПОЛНИТЕЛЬ:");
        assert_eq!(signature.0[0].name.as_deref(), Some("Иванов И.И."));
        assert_eq!(signature.0[1].caption, "ЗАКАЗЧИК:");
        assert_eq!(signature.0[1].name, None);
    }

    #[test]
    fn test_party_details_flatten_in_stable_order() {
        let party = PartyInfo {
            name: "ООО Ромашка".to_string(),
            tax_id: Some("7701234567".to_string()),
            registration_id: Some("770101001".to_string()),
            address: Some("г. Москва, ул. Ленина, д. 1".to_string()),
            bank_name: Some("АО Банк".to_string()),
            bank_bik: Some("044525225".to_string()),
            bank_account: Some("40702810400000012345".to_string()),
            correspondent_account: Some("30101810400000000225".to_string()),
            phone: Some("+7 495 123-45-67".to_string()),
            email: Some("info@romashka.ru".to_string()),
            signer_director: None,
            signer_accountant: None,
        };
        assert_eq!(
            party_details(&party),
            vec![
                "ИНН 7701234567, КПП 770101001",
                "Адрес: г. Москва, ул. Ленина, д. 1",
                "Р/с 40702810400000012345 в АО Банк",
                "БИК 044525225, К/с 30101810400000000225",
                "Тел.: +7 495 123-45-67",
                "Email: info@romashka.ru",
            ]
        );

        // a bare name produces no detail lines at all
        assert!(party_details(&PartyInfo {
            name: "ИП Петров".to_string(),
            ..Default::default()
        })
        .is_empty());
    }

    #[test]
    fn test_column_widths_fill_the_content_width() {
        for show_vat in [false, true] {
            let total: f32 = item_columns(show_vat).iter().map(|c| c.width).sum();
            assert!((total - 495.28).abs() < 0.01);
        }
    }
}
