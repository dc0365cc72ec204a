//! Skills and professions taxonomy lookups.

use crate::error::TxError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::professions::{NormalizeProfessionsRequest, NormalizeProfessionsResponseValue};
use crate::models::skills::{
    AutocompleteSkillsRequest, ExtractSkillsRequest, ExtractSkillsResponseValue, LookupSkillsRequest,
    NormalizeSkillsRequest, NormalizeSkillsResponseValue, SkillsResponseValue,
};

use super::TxClient;

impl TxClient {
    pub fn build_skills_autocomplete(&self, body: &AutocompleteSkillsRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/skills/autocomplete", body)
    }

    pub fn read_skills_autocomplete(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<SkillsResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_skills_lookup(&self, body: &LookupSkillsRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/skills/lookup", body)
    }

    pub fn read_skills_lookup(&self, request: &HttpRequest, response: HttpResponse) -> Result<SkillsResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_skills_normalize(&self, body: &NormalizeSkillsRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/skills/normalize", body)
    }

    pub fn read_skills_normalize(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<NormalizeSkillsResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_skills_extract(&self, body: &ExtractSkillsRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/skills/extract", body)
    }

    pub fn read_skills_extract(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<ExtractSkillsResponseValue, TxError> {
        self.read_value(request, response)
    }

    pub fn build_professions_normalize(&self, body: &NormalizeProfessionsRequest) -> Result<HttpRequest, TxError> {
        self.request_with_body(HttpMethod::Post, "/professions/normalize", body)
    }

    pub fn read_professions_normalize(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<NormalizeProfessionsResponseValue, TxError> {
        self.read_value(request, response)
    }
}
