use jiff::civil::Date;

pub fn parse_date(input: &str) -> Result<Date, String> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|_| format!("Invalid date {input}, expected YYYY-MM-DD"))
}
