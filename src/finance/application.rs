//! Pre-qualification financing application.
//!
//! The storefront collects the applicant's details here and hands a flat
//! key/value body to the form endpoint. Sensitive data (SSN) is never
//! collected; that happens on the lender's secure credit app.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default state for license and address pickers.
pub const HOME_STATE: &str = "MA";

/// Who is applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    #[default]
    Buyer,
    #[serde(rename = "cobuyer")]
    CoBuyer,
}

impl Party {
    pub fn as_str(&self) -> &'static str {
        match self {
            Party::Buyer => "buyer",
            Party::CoBuyer => "cobuyer",
        }
    }
}

/// Personal and license details of one applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applicant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub cell_phone: String,
    /// Optional for both applicants.
    pub home_phone: String,
    /// mm/dd/yyyy, kept as typed.
    pub dob: String,
    pub dl_number: String,
    pub dl_state: String,
    pub dl_issue_date: String,
    pub dl_expiry_date: String,
}

impl Default for Applicant {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            cell_phone: String::new(),
            home_phone: String::new(),
            dob: String::new(),
            dl_number: String::new(),
            dl_state: HOME_STATE.to_string(),
            dl_issue_date: String::new(),
            dl_expiry_date: String::new(),
        }
    }
}

/// Current job plus an optional previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employment {
    pub employer_name: String,
    pub title_position: String,
    pub employer_phone: String,
    pub monthly_income: String,
    /// Time on the job; the pickers offer "0".."30" years and "0".."11" months.
    pub years: String,
    pub months: String,
    pub previous: Option<PreviousEmployer>,
}

impl Default for Employment {
    fn default() -> Self {
        Self {
            employer_name: String::new(),
            title_position: String::new(),
            employer_phone: String::new(),
            monthly_income: String::new(),
            years: "0".to_string(),
            months: "0".to_string(),
            previous: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousEmployer {
    pub employer_name: String,
    pub title_position: String,
    pub employer_phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: HOME_STATE.to_string(),
            zip: String::new(),
        }
    }
}

/// Buyer's residence. The co-buyer is assumed to share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residence {
    pub address: Address,
    /// Rent, Own or Other.
    pub housing_type: String,
    pub monthly_housing: String,
    pub years: String,
    pub months: String,
    pub previous: Option<Address>,
}

impl Default for Residence {
    fn default() -> Self {
        Self {
            address: Address::default(),
            housing_type: "Rent".to_string(),
            monthly_housing: String::new(),
            years: "0".to_string(),
            months: "0".to_string(),
            previous: None,
        }
    }
}

/// Vehicle the applicant is shopping for. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestedVehicle {
    pub keyword: String,
    pub stock_number: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub price: String,
    pub down_payment: String,
    pub exterior_color: String,
    pub interior_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinancingApplication {
    pub party: Party,
    pub buyer: Applicant,
    pub residence: Residence,
    pub employment: Employment,
    pub vehicle: InterestedVehicle,
    pub co_buyer: Applicant,
    pub co_buyer_employment: Employment,
    pub consent_credit: bool,
    pub consent_contact: bool,
}

impl Default for FinancingApplication {
    fn default() -> Self {
        Self {
            party: Party::Buyer,
            buyer: Applicant::default(),
            residence: Residence::default(),
            employment: Employment::default(),
            vehicle: InterestedVehicle::default(),
            co_buyer: Applicant::default(),
            co_buyer_employment: Employment::default(),
            consent_credit: false,
            // opt-in to contact is pre-checked; the credit authorization is not
            consent_contact: true,
        }
    }
}

impl FinancingApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels of required fields that are still blank, in form order.
    ///
    /// Text fields count as blank when empty after trimming. The tenure
    /// pickers only need a selection. Co-buyer fields are required only when
    /// the party is [`Party::CoBuyer`].
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut require = |label: &'static str, present: bool| {
            if !present {
                missing.push(label);
            }
        };

        for (label, value) in applicant_required(&self.buyer, Party::Buyer) {
            require(label, filled(value));
        }
        let residence = &self.residence;
        require("Street address", filled(&residence.address.street));
        require("City", filled(&residence.address.city));
        require("State", filled(&residence.address.state));
        require("ZIP", filled(&residence.address.zip));
        require("Housing type", filled(&residence.housing_type));
        require("Monthly housing payment", filled(&residence.monthly_housing));
        require("Years at address", !residence.years.is_empty());
        require("Months at address", !residence.months.is_empty());
        for (label, present) in employment_required(&self.employment, Party::Buyer) {
            require(label, present);
        }
        require("Credit authorization", self.consent_credit);

        if self.party == Party::CoBuyer {
            for (label, value) in applicant_required(&self.co_buyer, Party::CoBuyer) {
                require(label, filled(value));
            }
            for (label, present) in employment_required(&self.co_buyer_employment, Party::CoBuyer) {
                require(label, present);
            }
        }
        missing
    }

    pub fn can_submit(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// URL-encodable body for the `financing-application` form.
    ///
    /// Every field is sent, blank or not, so the receiving form sees a fixed
    /// schema. Optional sections that are hidden send empty values and a
    /// `No` toggle.
    pub fn payload(&self) -> BTreeMap<&'static str, String> {
        let mut body = BTreeMap::new();
        body.insert("form-name", "financing-application".to_string());
        body.insert("party", self.party.as_str().to_string());

        insert_applicant(&mut body, &self.buyer, BUYER_KEYS);

        let residence = &self.residence;
        body.insert("streetAddress", residence.address.street.clone());
        body.insert("city", residence.address.city.clone());
        body.insert("stateUS", residence.address.state.clone());
        body.insert("zip", residence.address.zip.clone());
        body.insert("housingType", residence.housing_type.clone());
        body.insert("monthlyHousing", residence.monthly_housing.clone());
        body.insert("addrYears", residence.years.clone());
        body.insert("addrMonths", residence.months.clone());
        let previous = residence.previous.clone().unwrap_or_default();
        body.insert("prevStreet", previous.street);
        body.insert("prevCity", previous.city);
        body.insert("prevState", previous.state);
        body.insert("prevZip", previous.zip);
        body.insert("showPrevAddress", yes_no(residence.previous.is_some()));

        let job = &self.employment;
        body.insert("employerName", job.employer_name.clone());
        body.insert("titlePosition", job.title_position.clone());
        body.insert("employerPhone", job.employer_phone.clone());
        body.insert("monthlyIncome", job.monthly_income.clone());
        body.insert("jobYears", job.years.clone());
        body.insert("jobMonths", job.months.clone());
        let previous = job.previous.clone().unwrap_or_default();
        body.insert("prevEmployerName", previous.employer_name);
        body.insert("prevTitlePosition", previous.title_position);
        body.insert("prevEmployerPhone", previous.employer_phone);
        body.insert("showPrevEmployment", yes_no(job.previous.is_some()));

        let vehicle = &self.vehicle;
        body.insert("vehicleKeyword", vehicle.keyword.clone());
        body.insert("stockNumber", vehicle.stock_number.clone());
        body.insert("vehicleYear", vehicle.year.clone());
        body.insert("vehicleMake", vehicle.make.clone());
        body.insert("vehicleModel", vehicle.model.clone());
        body.insert("vehiclePrice", vehicle.price.clone());
        body.insert("downPayment", vehicle.down_payment.clone());
        body.insert("exteriorColor", vehicle.exterior_color.clone());
        body.insert("interiorColor", vehicle.interior_color.clone());

        insert_applicant(&mut body, &self.co_buyer, CO_BUYER_KEYS);
        let co_job = &self.co_buyer_employment;
        body.insert("cEmployerName", co_job.employer_name.clone());
        body.insert("cTitlePosition", co_job.title_position.clone());
        body.insert("cEmployerPhone", co_job.employer_phone.clone());
        body.insert("cMonthlyIncome", co_job.monthly_income.clone());
        body.insert("cJobYears", co_job.years.clone());
        body.insert("cJobMonths", co_job.months.clone());

        body.insert("consentCredit", yes_no(self.consent_credit));
        body.insert("consentContact", yes_no(self.consent_contact));
        body
    }
}

/// Field names for one applicant, in [`Applicant`] field order.
type ApplicantKeys = [&'static str; 10];

const BUYER_KEYS: ApplicantKeys = [
    "bFirstName",
    "bLastName",
    "bEmail",
    "bCellPhone",
    "bHomePhone",
    "bDob",
    "bDlNumber",
    "bDlState",
    "bDlIssueDate",
    "bDlExpiryDate",
];

const CO_BUYER_KEYS: ApplicantKeys = [
    "cFirstName",
    "cLastName",
    "cEmail",
    "cCellPhone",
    "cHomePhone",
    "cDob",
    "cDlNumber",
    "cDlState",
    "cDlIssueDate",
    "cDlExpiryDate",
];

fn insert_applicant(
    body: &mut BTreeMap<&'static str, String>,
    applicant: &Applicant,
    keys: ApplicantKeys,
) {
    let values = [
        &applicant.first_name,
        &applicant.last_name,
        &applicant.email,
        &applicant.cell_phone,
        &applicant.home_phone,
        &applicant.dob,
        &applicant.dl_number,
        &applicant.dl_state,
        &applicant.dl_issue_date,
        &applicant.dl_expiry_date,
    ];
    for (key, value) in keys.into_iter().zip(values) {
        body.insert(key, value.clone());
    }
}

fn applicant_required(applicant: &Applicant, who: Party) -> Vec<(&'static str, &str)> {
    let labels: [&'static str; 9] = if who == Party::Buyer {
        [
            "Buyer first name",
            "Buyer last name",
            "Buyer email",
            "Buyer cell phone",
            "Buyer date of birth",
            "Buyer license number",
            "Buyer license state",
            "Buyer license issue date",
            "Buyer license expiry date",
        ]
    } else {
        [
            "Co-buyer first name",
            "Co-buyer last name",
            "Co-buyer email",
            "Co-buyer cell phone",
            "Co-buyer date of birth",
            "Co-buyer license number",
            "Co-buyer license state",
            "Co-buyer license issue date",
            "Co-buyer license expiry date",
        ]
    };
    let values = [
        applicant.first_name.as_str(),
        applicant.last_name.as_str(),
        applicant.email.as_str(),
        applicant.cell_phone.as_str(),
        applicant.dob.as_str(),
        applicant.dl_number.as_str(),
        applicant.dl_state.as_str(),
        applicant.dl_issue_date.as_str(),
        applicant.dl_expiry_date.as_str(),
    ];
    labels.into_iter().zip(values).collect()
}

fn employment_required(job: &Employment, who: Party) -> Vec<(&'static str, bool)> {
    let labels: [&'static str; 6] = if who == Party::Buyer {
        [
            "Buyer employer",
            "Buyer title/position",
            "Buyer employer phone",
            "Buyer monthly income",
            "Buyer years on job",
            "Buyer months on job",
        ]
    } else {
        [
            "Co-buyer employer",
            "Co-buyer title/position",
            "Co-buyer employer phone",
            "Co-buyer monthly income",
            "Co-buyer years on job",
            "Co-buyer months on job",
        ]
    };
    let present = [
        filled(&job.employer_name),
        filled(&job.title_position),
        filled(&job.employer_phone),
        filled(&job.monthly_income),
        !job.years.is_empty(),
        !job.months.is_empty(),
    ];
    labels.into_iter().zip(present).collect()
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}
