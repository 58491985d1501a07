//! Request and response types for the crop advisory API.

pub mod forms;
pub mod query;
pub mod responses;

pub use forms::{CropsRequest, DiagnoseRequest, RecommendForm, RecommendRequest};
pub use query::QueryParams;
pub use responses::{
    CropsResponse, Diagnosis, Fertilizer, FertilizerCosts, InputEcho, RecommendationItem,
    RecommendationResponse, Risk, Scalar,
};
