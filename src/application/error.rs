#[derive(Debug)]
pub enum ApplicationError {
    CategoryNotFound,
    ProductNotFound,
    ImageDecodeFailed(String),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    InternalError(String),
    DatabaseError(String),
}
