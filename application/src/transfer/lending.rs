pub struct LendingDto {
    pub patron_id: String,
    pub book_id: String,
}
