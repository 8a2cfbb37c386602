use super::GenerationRequest;

pub enum Action {
    GenerationRequest(GenerationRequest),
    HealthCheck(),
}
