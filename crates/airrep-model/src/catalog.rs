//! Specifications of the seven supported exports.
//!
//! Preamble and trailer counts, rename tables and numeric rules mirror the
//! layout the reservation system writes; change them only together with a
//! sample file that shows the new layout.

use crate::kind::ReportKind;
use crate::spec::{
    ConsolidationSpec, DerivedRule, FieldSpec, HeaderCase, MetadataExtract, MetadataRule,
    NumericRule, ReportSpec, TrailerStage,
};

const REPORT_PERIOD: &[MetadataRule] = &[
    MetadataRule {
        key: "from_date",
        label: "From Date",
        extract: MetadataExtract::DayFirstDate,
        column: "report_from_date",
    },
    MetadataRule {
        key: "to_date",
        label: "To Date",
        extract: MetadataExtract::DayFirstDate,
        column: "report_to_date",
    },
];

pub static SEAT_INVENTORY: ReportSpec = ReportSpec {
    kind: ReportKind::SeatInventory,
    preamble_lines: 0,
    metadata_lines: 0,
    trailer_rows: 0,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Snake,
    renames: &[
        ("cos", "class_of_service"),
        ("seats_allocate", "seats_allocated"),
        ("fare_collection(usd)", "fare_usd"),
    ],
    fields: &[
        FieldSpec::date("flight_date"),
        FieldSpec::text("flight_no"),
        FieldSpec::text("segment"),
        FieldSpec::text("class_of_service"),
        FieldSpec::integer("seats_allocated", NumericRule::Plain).required(),
        FieldSpec::integer("seats_sold", NumericRule::Plain),
        FieldSpec::integer("seats_available", NumericRule::Plain),
        FieldSpec::float("seat_factor", NumericRule::Amount),
        FieldSpec::float("load_factor", NumericRule::Plain),
    ],
    passthrough: false,
    metadata: &[],
    derived: &[
        DerivedRule::Difference {
            target: "seats_sold",
            minuend: "seats_allocated",
            subtrahend: "seats_available",
        },
        DerivedRule::Percentage {
            target: "load_factor",
            numerator: "seats_sold",
            denominator: "seats_allocated",
        },
    ],
    consolidation: None,
    persist_processed: false,
};

pub static EMPLOYEE_PERFORMANCE: ReportSpec = ReportSpec {
    kind: ReportKind::EmployeePerformance,
    preamble_lines: 0,
    metadata_lines: 0,
    trailer_rows: 0,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Agent Name", "agent_name"),
        ("Login ID", "login_id"),
        ("User Name", "user_name"),
        ("No. of Reservations", "reservations"),
        ("No. of PAX", "pax"),
        ("Total Charges(USD)", "total_charges"),
        ("Total Discount(USD)", "total_discount"),
    ],
    fields: &[
        FieldSpec::text("agent_name").required(),
        FieldSpec::text("login_id"),
        FieldSpec::text("user_name"),
        FieldSpec::integer("reservations", NumericRule::Plain),
        FieldSpec::integer("pax", NumericRule::Plain),
        FieldSpec::float("total_charges", NumericRule::Plain),
        FieldSpec::float("total_discount", NumericRule::Plain),
    ],
    passthrough: true,
    metadata: &[],
    derived: &[],
    consolidation: None,
    persist_processed: false,
};

pub static PAYMENT: ReportSpec = ReportSpec {
    kind: ReportKind::Payment,
    preamble_lines: 5,
    metadata_lines: 5,
    trailer_rows: 3,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Agent/GSA Name", "agent_name"),
        ("Currency", "currency"),
        ("Net Amount", "net_amount"),
    ],
    fields: &[
        FieldSpec::text("agent_name"),
        FieldSpec::text("currency"),
        FieldSpec::float("net_amount", NumericRule::Plain)
            .required()
            .drop_blank_rows(),
    ],
    passthrough: true,
    metadata: REPORT_PERIOD,
    derived: &[],
    consolidation: None,
    persist_processed: true,
};

pub static ENPLANEMENT: ReportSpec = ReportSpec {
    kind: ReportKind::Enplanement,
    preamble_lines: 5,
    metadata_lines: 0,
    trailer_rows: 3,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Flight Number", "flight_number"),
        ("Segment", "segment"),
        ("Departure Date", "departure_date"),
        ("Booked Load (Adult/Infant)", "booked_load"),
        ("Go Shows", "go_shows"),
        ("No Shows", "no_shows"),
        ("Flown Load", "flown_load"),
    ],
    fields: &[
        FieldSpec::text("flight_number").required().strip_newlines(),
        FieldSpec::text("segment").strip_newlines(),
        FieldSpec::date("departure_date"),
        FieldSpec::integer("adult_booked", NumericRule::Plain),
        FieldSpec::integer("infant_booked", NumericRule::Plain),
        FieldSpec::integer("go_shows", NumericRule::DigitRun),
        FieldSpec::integer("no_shows", NumericRule::DigitRun),
        FieldSpec::integer("flown_load", NumericRule::DigitRun),
    ],
    passthrough: true,
    metadata: &[],
    derived: &[DerivedRule::SplitPair {
        source: "booked_load",
        first: "adult_booked",
        second: "infant_booked",
        separator: '\\',
    }],
    consolidation: None,
    persist_processed: false,
};

pub static AGENT_PRODUCTIVITY: ReportSpec = ReportSpec {
    kind: ReportKind::AgentProductivity,
    preamble_lines: 6,
    metadata_lines: 5,
    trailer_rows: 3,
    trailer_stage: TrailerStage::AfterRowFilter,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Agent Code", "agent_code"),
        ("Agent Name", "agent_name"),
        ("Current Sale(USD)", "current_sale_usd"),
        ("YTD Sale for the Month(USD)", "ytd_sale_month_usd"),
        ("YTD Sale(USD)", "ytd_sale_usd"),
    ],
    fields: &[
        FieldSpec::text("agent_code").required().drop_blank_rows(),
        FieldSpec::text("agent_name").required().drop_blank_rows(),
        FieldSpec::float("current_sale_usd", NumericRule::Plain),
        FieldSpec::float("ytd_sale_month_usd", NumericRule::Plain),
        FieldSpec::float("ytd_sale_usd", NumericRule::Plain),
        FieldSpec::float("monthly_percentage", NumericRule::Plain),
    ],
    passthrough: true,
    metadata: REPORT_PERIOD,
    derived: &[DerivedRule::Percentage {
        target: "monthly_percentage",
        numerator: "ytd_sale_month_usd",
        denominator: "ytd_sale_usd",
    }],
    consolidation: None,
    persist_processed: true,
};

pub static INVOICE_SUMMARY: ReportSpec = ReportSpec {
    kind: ReportKind::InvoiceSummary,
    preamble_lines: 9,
    metadata_lines: 9,
    trailer_rows: 3,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Invoice Number", "invoice_number"),
        ("Agent Code", "agent_code"),
        ("Agent Name", "agent_name"),
        ("Station Code", "station_code"),
        ("Station Name", "station_name"),
        ("Country", "country"),
        ("Territory", "territory"),
        ("Fare", "fare"),
        ("Tax", "tax"),
        ("Surcharge", "surcharge"),
        ("Modify", "modify"),
        ("Invoice Total", "invoice_total"),
    ],
    fields: &[
        FieldSpec::text("invoice_number"),
        FieldSpec::text("agent_code"),
        FieldSpec::text("agent_name"),
        FieldSpec::text("station_code"),
        FieldSpec::text("station_name"),
        FieldSpec::text("country"),
        FieldSpec::text("territory"),
        FieldSpec::float("fare", NumericRule::Amount),
        FieldSpec::float("tax", NumericRule::Amount),
        FieldSpec::float("surcharge", NumericRule::Amount),
        FieldSpec::float("modify", NumericRule::Amount),
        FieldSpec::float("invoice_total", NumericRule::Amount).required(),
    ],
    passthrough: true,
    metadata: &[
        MetadataRule {
            key: "report_year",
            label: "Year",
            extract: MetadataExtract::ColonValue,
            column: "report_year",
        },
        MetadataRule {
            key: "report_month",
            label: "Month",
            extract: MetadataExtract::ColonValue,
            column: "report_month",
        },
    ],
    derived: &[],
    consolidation: None,
    persist_processed: false,
};

pub static AGENT_USER_PRIVILEGES: ReportSpec = ReportSpec {
    kind: ReportKind::AgentUserPrivileges,
    preamble_lines: 4,
    metadata_lines: 0,
    trailer_rows: 3,
    trailer_stage: TrailerStage::Body,
    header_case: HeaderCase::Preserve,
    renames: &[
        ("Agent Code", "agent_code"),
        ("Agent Name", "agent_name"),
        ("User ID", "user_id"),
        ("User Name", "user_name"),
        ("Roles", "roles"),
    ],
    fields: &[
        FieldSpec::text("agent_code").required(),
        FieldSpec::text("agent_name").required(),
        FieldSpec::text("user_id").required(),
        FieldSpec::text("user_name").required(),
        FieldSpec::text("roles").required(),
    ],
    passthrough: false,
    metadata: &[],
    derived: &[],
    consolidation: Some(ConsolidationSpec {
        key: &["agent_code", "agent_name", "user_id", "user_name"],
        child: "roles",
        separator: "\n",
    }),
    persist_processed: false,
};
