//! Prompts sent to the hosted models. The report is written for the
//! Vietnamese market, so the analysis prompt is in Vietnamese.

pub fn analysis_prompt(ticker: &str) -> String {
    format!(
        r#"
Bạn là một nhà phân tích tài chính chuyên nghiệp, chuyên sâu về thị trường chứng khoán Việt Nam.
**Nhiệm vụ:** Tạo một báo cáo phân tích toàn diện cho mã cổ phiếu hoặc chỉ số: "{ticker}", sử dụng phương pháp phân tích từ trên xuống (top-down).
**QUY TẮC QUAN TRỌNG VỀ TRÍCH DẪN NGUỒN:** Hệ thống sẽ tự động thêm các trích dẫn nguồn dạng số (ví dụ: [1], [2]) vào nội dung bạn viết. Bạn chỉ cần tập trung vào việc cung cấp thông tin chính xác và chất lượng cao từ các nguồn tìm kiếm được.
**Cấu trúc Phân tích:**
1. **Phân tích Vĩ mô & Vi mô:** Tóm tắt điều kiện kinh tế, nhấn mạnh số liệu quan trọng (GDP, lạm phát, lãi suất), và tác động đến thị trường.
2. **Phân tích Ngành:** Phân tích xu hướng, tốc độ tăng trưởng, chu kỳ, rủi ro và động lực của ngành.
3. **Phân tích Cơ bản Doanh nghiệp:** Tổng quan mô hình kinh doanh, thị phần, lợi thế cạnh tranh, và phân tích các chỉ số tài chính (doanh thu, lợi nhuận, ROE, P/E, P/B).
4. **Phân tích Dòng tiền:** Phân tích giao dịch khối ngoại/tự doanh, đột biến khối lượng, và các chỉ báo dòng tiền (MFI, OBV) để nhận định dòng tiền lớn.
5. **Phân tích Kỹ thuật:** Phân tích biểu đồ giá, xu hướng, hỗ trợ/kháng cự, và các chỉ báo (RSI, MACD, MA, Khối lượng).
6. **Kết luận & Khuyến nghị Đầu tư:** Đưa ra khuyến nghị **MUA / BÁN / NẮM GIỮ** kèm vùng giá cụ thể, lợi nhuận tiềm năng, và mức dừng lỗ.
**Yêu cầu về Định dạng Đầu ra:** Toàn bộ phản hồi PHẢI là một đối tượng JSON duy nhất với cấu trúc: {{ "assumedDate": "string", "closingPrice": "string", "macro": "string", "industry": "string", "fundamental": "string", "technical": "string", "cashFlow": "string", "recommendation": {{ "action": "string", "details": "string" }} }}
"#
    )
}

pub fn chart_prompt(ticker: &str) -> String {
    format!(
        r#"Create a professional, dark-theme stock chart for a financial report on the ticker "{ticker}". Requirements: 1. Type: Candlestick chart for the last 6-12 months. 2. Indicators: MA50, MA200, RSI, and MACD. 3. Theme: Dark theme, high-contrast colors. 4. Clarity: Ticker symbol visible, axes labeled. 5. No fictitious data."#
    )
}
