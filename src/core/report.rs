pub const REPORT_TITLE: &str = "Most Active Stocks from StockTwits";
pub const EMPTY_REPORT_LINE: &str = "No stocks found.";
const RULE_WIDTH: usize = 40;

pub fn report_header() -> String {
    format!("{}\n{}\n\n", REPORT_TITLE, "=".repeat(RULE_WIDTH))
}

/// 輸出檔內容: 標題 + `N. $SYMBOL` 每行一個
pub fn render_stock_list(stocks: &[String]) -> String {
    let mut body = report_header();

    if stocks.is_empty() {
        body.push_str(EMPTY_REPORT_LINE);
        body.push('\n');
        return body;
    }

    for (i, stock) in stocks.iter().enumerate() {
        body.push_str(&format!("{}. ${}\n", i + 1, stock));
    }
    body
}
