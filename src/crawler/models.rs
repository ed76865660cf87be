use std::fmt;

use serde::{Deserialize, Serialize};

/// A JSON value the site sends either as a string or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectoryPage {
    pub agencies: DirectoryAgencies,
}

#[derive(Debug, Deserialize)]
pub struct DirectoryAgencies {
    pub data: Vec<AgencyStub>,
}

/// One entry of the agency directory.
///
/// Every key must be present; metadata values may be `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AgencyStub {
    #[serde(rename = "real_estate_agency_id")]
    pub id: Scalar,
    #[serde(rename = "real_estate_agency_reference", deserialize_with = "Option::deserialize")]
    pub reference: Option<Scalar>,
    #[serde(rename = "real_estate_agency_url", deserialize_with = "Option::deserialize")]
    pub agency_url: Option<String>,
    /// Public profile page listing the staff.
    #[serde(rename = "url")]
    pub profile_url: String,
    #[serde(rename = "real_estate_agency_name", deserialize_with = "Option::deserialize")]
    pub name: Option<String>,
    #[serde(rename = "real_estate_agency_address", deserialize_with = "Option::deserialize")]
    pub address: Option<String>,
    #[serde(rename = "real_estate_agency_zip_code", deserialize_with = "Option::deserialize")]
    pub zip_code: Option<Scalar>,
    #[serde(rename = "real_estate_agency_city", deserialize_with = "Option::deserialize")]
    pub city: Option<String>,
    #[serde(rename = "real_estate_agency_contact_name", deserialize_with = "Option::deserialize")]
    pub contact_name: Option<String>,
    #[serde(rename = "real_estate_agency_contact_firstname", deserialize_with = "Option::deserialize")]
    pub contact_firstname: Option<String>,
    #[serde(rename = "real_estate_agency_email", deserialize_with = "Option::deserialize")]
    pub email: Option<String>,
    #[serde(rename = "real_estate_agency_phone", deserialize_with = "Option::deserialize")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentRecord {
    pub name: Option<String>,
    pub job: Option<String>,
    #[serde(rename = "mail")]
    pub email: Option<String>,
    #[serde(rename = "tel")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub title: serde_json::Value,
    pub name: serde_json::Value,
    pub price: serde_json::Value,
    #[serde(rename = "picture_urls_list")]
    pub picture_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencyResult {
    #[serde(rename = "real_estate_agency_name")]
    pub name: Option<String>,
    #[serde(rename = "real_estate_agency_address")]
    pub address: Option<String>,
    #[serde(rename = "real_estate_agency_zip_code")]
    pub zip_code: Option<Scalar>,
    #[serde(rename = "real_estate_agency_city")]
    pub city: Option<String>,
    #[serde(rename = "real_estate_agency_contact_name")]
    pub contact_name: Option<String>,
    #[serde(rename = "real_estate_agency_contact_firstname")]
    pub contact_firstname: Option<String>,
    #[serde(rename = "real_estate_agency_email")]
    pub email: Option<String>,
    #[serde(rename = "real_estate_agency_phone")]
    pub phone: Option<String>,
    #[serde(rename = "agents_information_list")]
    pub agents: Vec<AgentRecord>,
    #[serde(rename = "ads_information_list")]
    pub listings: Vec<ListingRecord>,
}

impl AgencyResult {
    pub fn new(stub: &AgencyStub, agents: Vec<AgentRecord>, listings: Vec<ListingRecord>) -> Self {
        Self {
            name: stub.name.clone(),
            address: stub.address.clone(),
            zip_code: stub.zip_code.clone(),
            city: stub.city.clone(),
            contact_name: stub.contact_name.clone(),
            contact_firstname: stub.contact_firstname.clone(),
            email: stub.email.clone(),
            phone: stub.phone.clone(),
            agents,
            listings,
        }
    }
}

pub type ScrapeOutput = Vec<AgencyResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stub_json() -> serde_json::Value {
        json!({
            "real_estate_agency_id": 412,
            "real_estate_agency_reference": "SP0412",
            "real_estate_agency_url": "lyon-6",
            "url": "https://example.test/agence/lyon-6",
            "real_estate_agency_name": "Agence Lyon 6",
            "real_estate_agency_address": "12 cours Franklin Roosevelt",
            "real_estate_agency_zip_code": "69006",
            "real_estate_agency_city": "Lyon",
            "real_estate_agency_contact_name": "Durand",
            "real_estate_agency_contact_firstname": "Hélène",
            "real_estate_agency_email": "lyon6@example.test",
            "real_estate_agency_phone": "0478000000"
        })
    }

    #[test]
    fn stub_accepts_numeric_and_text_ids() {
        let stub: AgencyStub = serde_json::from_value(stub_json()).unwrap();
        assert_eq!(stub.id.to_string(), "412");
        assert_eq!(stub.reference, Some(Scalar::Text("SP0412".into())));
        assert_eq!(stub.profile_url, "https://example.test/agence/lyon-6");
    }

    #[test]
    fn stub_without_profile_url_is_rejected() {
        let mut value = stub_json();
        value.as_object_mut().unwrap().remove("url");
        assert!(serde_json::from_value::<AgencyStub>(value).is_err());
    }

    #[test]
    fn stub_missing_metadata_key_is_rejected() {
        let mut value = stub_json();
        value.as_object_mut().unwrap().remove("real_estate_agency_name");
        assert!(serde_json::from_value::<AgencyStub>(value).is_err());

        let bare = json!({ "real_estate_agency_id": 1, "url": "https://example.test/a" });
        assert!(serde_json::from_value::<AgencyStub>(bare).is_err());
    }

    #[test]
    fn stub_accepts_null_metadata() {
        let mut value = stub_json();
        value["real_estate_agency_address"] = serde_json::Value::Null;
        let stub: AgencyStub = serde_json::from_value(value).unwrap();
        assert_eq!(stub.address, None);
    }

    #[test]
    fn result_copies_stub_metadata() {
        let stub: AgencyStub = serde_json::from_value(stub_json()).unwrap();
        let result = AgencyResult::new(&stub, vec![], vec![]);

        assert_eq!(result.name, stub.name);
        assert_eq!(result.address, stub.address);
        assert_eq!(result.zip_code, stub.zip_code);
        assert_eq!(result.city, stub.city);
        assert_eq!(result.contact_name, stub.contact_name);
        assert_eq!(result.contact_firstname, stub.contact_firstname);
        assert_eq!(result.email, stub.email);
        assert_eq!(result.phone, stub.phone);
    }

    #[test]
    fn result_serializes_with_site_keys() {
        let stub: AgencyStub = serde_json::from_value(stub_json()).unwrap();
        let agent = AgentRecord {
            name: Some("Jean Martin".into()),
            job: None,
            email: Some("jm@example.test".into()),
            phone: None,
        };
        let value = serde_json::to_value(AgencyResult::new(&stub, vec![agent], vec![])).unwrap();

        assert_eq!(value["real_estate_agency_zip_code"], "69006");
        assert_eq!(value["real_estate_agency_contact_firstname"], "Hélène");
        assert_eq!(value["agents_information_list"][0]["mail"], "jm@example.test");
        assert!(value["agents_information_list"][0]["tel"].is_null());
        assert_eq!(value["ads_information_list"], json!([]));
    }
}
