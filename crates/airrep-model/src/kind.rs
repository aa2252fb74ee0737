//! Report kind identification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::ModelError;
use crate::spec::ReportSpec;

/// The back-office exports understood by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Seat inventory and collections per flight/class.
    SeatInventory,
    /// Sales staff performance detail.
    EmployeePerformance,
    /// Company payment report (net amounts per agent and currency).
    Payment,
    /// Enplanement report (booked, go-show, no-show and flown loads).
    Enplanement,
    /// Agent productivity (current and year-to-date sales).
    AgentProductivity,
    /// Monthly invoice summary.
    InvoiceSummary,
    /// Agent/user privilege listing, one row per role.
    AgentUserPrivileges,
}

impl ReportKind {
    /// Every kind in catalog order.
    pub const ALL: [ReportKind; 7] = [
        Self::SeatInventory,
        Self::EmployeePerformance,
        Self::Payment,
        Self::Enplanement,
        Self::AgentProductivity,
        Self::InvoiceSummary,
        Self::AgentUserPrivileges,
    ];

    /// Stable kebab-case identifier used on the command line and in configs.
    #[must_use]
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::SeatInventory => "seat-inventory",
            Self::EmployeePerformance => "employee-performance",
            Self::Payment => "payment",
            Self::Enplanement => "enplanement",
            Self::AgentProductivity => "agent-productivity",
            Self::InvoiceSummary => "invoice-summary",
            Self::AgentUserPrivileges => "agent-user-privileges",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SeatInventory => "Seat Inventory & Collections",
            Self::EmployeePerformance => "Employee Performance",
            Self::Payment => "Payment / Sales",
            Self::Enplanement => "Enplanement",
            Self::AgentProductivity => "Agent Productivity",
            Self::InvoiceSummary => "Invoice Summary",
            Self::AgentUserPrivileges => "Agent/User Privileges",
        }
    }

    /// File name the reservation system uses when exporting this report.
    #[must_use]
    pub const fn default_file_name(&self) -> &'static str {
        match self {
            Self::SeatInventory => "SeatInventoryAndCollectionsReport.csv",
            Self::EmployeePerformance => "PerformanaceOfSalesStaffDetail.csv",
            Self::Payment => "CompanyPaymentReport.csv",
            Self::Enplanement => "EnplanementReport.csv",
            Self::AgentProductivity => "AgentProductivity.csv",
            Self::InvoiceSummary => "InvoiceSummaryReport.csv",
            Self::AgentUserPrivileges => "AgentUserPrivileges.csv",
        }
    }

    /// The declarative specification for this kind.
    #[must_use]
    pub fn spec(&self) -> &'static ReportSpec {
        match self {
            Self::SeatInventory => &catalog::SEAT_INVENTORY,
            Self::EmployeePerformance => &catalog::EMPLOYEE_PERFORMANCE,
            Self::Payment => &catalog::PAYMENT,
            Self::Enplanement => &catalog::ENPLANEMENT,
            Self::AgentProductivity => &catalog::AGENT_PRODUCTIVITY,
            Self::InvoiceSummary => &catalog::INVOICE_SUMMARY,
            Self::AgentUserPrivileges => &catalog::AGENT_USER_PRIVILEGES,
        }
    }

    /// Guess the kind from an export file name.
    ///
    /// Matching ignores case, spaces, underscores and any `(n)` copy suffix the
    /// browser appends to repeated downloads, so `CompanyPaymentReport (6).csv`
    /// resolves to [`ReportKind::Payment`].
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name
            .rsplit_once('.')
            .map_or(name, |(stem, _)| stem)
            .to_ascii_lowercase();
        let compact: String = stem
            .chars()
            .take_while(|ch| *ch != '(')
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        Self::ALL.into_iter().find(|kind| {
            let expected: String = kind
                .default_file_name()
                .trim_end_matches(".csv")
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase();
            compact == expected
        })
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| ModelError::UnknownReportKind(s.to_string()))
    }
}
