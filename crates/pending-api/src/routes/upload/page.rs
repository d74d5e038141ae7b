//! Upload page rendering - form and result pages

use axum::extract::{Multipart, State};
use axum::response::Html;
use pending_core::{round_amount, AggregationResult, ProcessSummary, Side};
use pending_export::ArtifactNames;
use pending_utils::{escape_html, format_amount};
use rust_decimal::Decimal;

use super::read_upload;
use crate::pipeline::{analyze, publish};
use crate::{base_html, ApiError, AppState};

const DROP_ZONE_SCRIPT: &str = r#"<script>
(function () {
    const zone = document.getElementById('drop-zone');
    const input = document.getElementById('file-input');
    const label = document.getElementById('file-name');
    const submit = document.getElementById('submit-btn');
    const flash = document.getElementById('client-flash');
    const accepted = /\.(xlsx|xls)$/i;

    function choose(file) {
        if (!file) { return; }
        if (!accepted.test(file.name)) {
            flash.textContent = 'Invalid file type. Please upload an Excel file (.xlsx or .xls)';
            flash.classList.remove('hidden');
            input.value = '';
            label.textContent = '';
            submit.disabled = true;
            return;
        }
        flash.classList.add('hidden');
        label.textContent = file.name;
        submit.disabled = false;
    }

    zone.addEventListener('click', function () { input.click(); });
    zone.addEventListener('dragover', function (e) { e.preventDefault(); zone.classList.add('dragover'); });
    zone.addEventListener('dragleave', function () { zone.classList.remove('dragover'); });
    zone.addEventListener('drop', function (e) {
        e.preventDefault();
        zone.classList.remove('dragover');
        if (e.dataTransfer.files.length) {
            input.files = e.dataTransfer.files;
            choose(e.dataTransfer.files[0]);
        }
    });
    input.addEventListener('change', function () { choose(input.files[0]); });
})();
</script>"#;

/// Upload form, optionally with an error message from the previous attempt
pub fn upload_form_html(flash: Option<&str>) -> String {
    let flash_html = match flash {
        Some(message) => format!(
            r#"<div class='bg-red-50 border border-red-200 text-red-800 rounded-lg p-4 mb-4'>{}</div>"#,
            escape_html(message)
        ),
        None => String::new(),
    };

    let content = format!(
        r#"<div class='mb-6'><h1 class='text-2xl font-bold'>Pending Debits Journal Entry</h1>
        <p class='text-gray-600'>Upload the processor ACH export. Rows dated in the month after the file period are totalled into a journal entry.</p></div>
        {}
        <div id='client-flash' class='hidden bg-red-50 border border-red-200 text-red-800 rounded-lg p-4 mb-4'></div>
        <form action='/upload' method='post' enctype='multipart/form-data' class='bg-white rounded-xl shadow-sm p-6'>
            <div id='drop-zone' class='drop-zone border-2 border-dashed border-gray-300 rounded-lg p-10 text-center cursor-pointer'>
                <p class='text-lg font-medium'>Drag and drop an Excel file here</p>
                <p class='text-sm text-gray-500'>or click to browse (.xlsx, .xls)</p>
                <p id='file-name' class='mt-2 font-medium text-indigo-600'></p>
            </div>
            <input id='file-input' type='file' name='file' accept='.xlsx,.xls' class='hidden'>
            <button id='submit-btn' type='submit' disabled class='mt-4 px-4 py-2 bg-indigo-600 text-white rounded-lg disabled:opacity-50'>Process File</button>
        </form>
        {}"#,
        flash_html, DROP_ZONE_SCRIPT
    );
    base_html("Upload", &content)
}

fn amount_class(net: Decimal) -> &'static str {
    if net.is_zero() {
        "text-gray-700"
    } else if net.is_sign_negative() {
        "text-red-700"
    } else {
        "text-green-700"
    }
}

/// Result page with totals, the journal preview and download links
pub fn result_html(summary: &ProcessSummary, result: &AggregationResult, names: &ArtifactNames) -> String {
    let journal_rows: String = result
        .journal_entry
        .iter()
        .map(|line| {
            let amount = format_amount(line.amount);
            let (debit, credit) = match line.side {
                Side::Debit => (amount.as_str(), ""),
                Side::Credit => ("", amount.as_str()),
            };
            format!(
                "<tr class='border-b'><td class='py-2'>{}</td><td class='py-2 text-right'>{}</td><td class='py-2 text-right'>{}</td></tr>",
                escape_html(&line.account.to_string()),
                debit,
                credit
            )
        })
        .collect();

    let no_entry_note = if summary.journal_required {
        String::new()
    } else {
        "<p class='mt-3 italic text-gray-600'>No journal entry required (Net Amount = 0)</p>".to_string()
    };

    let warnings_html = if summary.warnings.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = summary
            .warnings
            .iter()
            .map(|w| format!("<li class='ml-4'>{}</li>", escape_html(w)))
            .collect();
        format!(
            r#"<div class='bg-yellow-50 border border-yellow-200 rounded-lg p-4 mb-6'><p class='font-medium text-yellow-800'>Warnings</p><ul class='mt-2 text-sm text-yellow-700 list-disc'>{}</ul></div>"#,
            items.join("")
        )
    };

    let full_link = urlencoding::encode(&names.full);

    let content = format!(
        r#"<div class='mb-6'><h1 class='text-2xl font-bold'>Processing Complete</h1></div>
        {}
        <div class='grid grid-cols-2 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>File Period</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>Date Filter</p><p class='text-xl font-bold'>{}</p></div>
        </div>
        <div class='grid grid-cols-2 md:grid-cols-4 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>Transactions</p><p class='text-xl font-bold'>{}</p><p class='text-xs text-gray-400'>of {} rows, {} flagged</p></div>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>Total ACH Debit</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>Total ACH Return</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg shadow-sm'><p class='text-sm text-gray-500'>Net Amount</p><p class='text-xl font-bold {}'>{}</p></div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h2 class='text-lg font-semibold mb-4'>Journal Entry Preview</h2>
            <table class='w-full text-sm'>
                <thead><tr class='border-b text-gray-500'><th class='text-left py-2'>Account</th><th class='text-right py-2'>Debit</th><th class='text-right py-2'>Credit</th></tr></thead>
                <tbody>{}</tbody>
            </table>
            {}
        </div>
        <div class='flex gap-4'>
            <a href='/download/{}' class='px-4 py-2 bg-indigo-600 text-white rounded-lg'>Download Summary + JE</a>
            <a href='/download-je/{}' class='px-4 py-2 bg-green-600 text-white rounded-lg'>Download JE Only</a>
            <a href='/' class='px-4 py-2 border rounded-lg'>Process Another File</a>
        </div>"#,
        warnings_html,
        escape_html(&summary.file_period),
        escape_html(&summary.target_period),
        summary.row_count,
        summary.total_rows,
        summary.flagged_rows,
        format_amount(round_amount(result.total_debit)),
        format_amount(round_amount(result.total_return)),
        amount_class(result.net_amount_rounded()),
        format_amount(result.net_amount_rounded()),
        journal_rows,
        no_entry_note,
        full_link,
        full_link,
    );
    base_html("Results", &content)
}

/// Upload form page
pub async fn index_page() -> Html<String> {
    Html(upload_form_html(None))
}

/// Handle a form upload: process it, store both workbooks, show the result
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Html<String>, ApiError> {
    let upload = read_upload(&state, multipart).await?;
    let analysis = analyze(&state, &upload)?;
    let names = publish(&state, &upload, &analysis).await?;
    Ok(Html(result_html(&analysis.summary(), &analysis.outcome.result, &names)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pending_core::{process, ProcessOutcome, TransactionRow};
    use rust_decimal_macros::dec;

    fn outcome(october_debit: Decimal, october_return: Decimal) -> (ProcessSummary, ProcessOutcome) {
        let date = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
        let rows = vec![
            TransactionRow::new(date(9, 15), dec!(100), dec!(20)),
            TransactionRow::new(date(9, 30), dec!(0), dec!(0)),
            TransactionRow::new(date(10, 1), october_debit, october_return),
        ];
        let outcome = process(&rows).unwrap();
        let summary = ProcessSummary::new(&outcome, &rows, vec!["<b>check</b>".to_string()]);
        (summary, outcome)
    }

    #[test]
    fn test_amount_class() {
        assert_eq!(amount_class(Decimal::new(7000, 2)), "text-green-700");
        assert_eq!(amount_class(Decimal::new(-3000, 2)), "text-red-700");
        assert_eq!(amount_class(Decimal::ZERO), "text-gray-700");
    }

    #[test]
    fn test_result_page() {
        let (summary, outcome) = outcome(dec!(1280.5), dec!(10.25));
        let names = ArtifactNames::new("20251019_101500_0123456789ab", "09 Control.xlsx");
        let html = result_html(&summary, &outcome.result, &names);
        assert!(html.contains("September 2025"));
        assert!(html.contains("October 2025"));
        assert!(html.contains("1,280.50"));
        assert!(html.contains("text-green-700'>1,270.25"));
        assert!(html.contains("/download/20251019_101500_0123456789ab_09_Control_Summary_JE.xlsx"));
        assert!(html.contains("/download-je/20251019_101500_0123456789ab_09_Control_Summary_JE.xlsx"));
        assert!(html.contains("&lt;b&gt;check&lt;/b&gt;"));
        assert!(!html.contains("No journal entry required"));
    }

    #[test]
    fn test_result_page_negative_net() {
        let (summary, outcome) = outcome(dec!(10), dec!(40));
        let html = result_html(&summary, &outcome.result, &ArtifactNames::new("id", "c.xlsx"));
        assert!(html.contains("text-red-700'>-30.00"));
    }

    #[test]
    fn test_result_page_zero_net() {
        let (summary, outcome) = outcome(dec!(25), dec!(25));
        let html = result_html(&summary, &outcome.result, &ArtifactNames::new("id", "c.xlsx"));
        assert!(html.contains("No journal entry required (Net Amount = 0)"));
    }

    #[test]
    fn test_upload_form_flash_is_escaped() {
        let html = upload_form_html(Some("bad <file>"));
        assert!(html.contains("bad &lt;file&gt;"));
        assert!(html.contains("name='file'"));
    }
}
