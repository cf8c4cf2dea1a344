//! Built-in keyword and citation rule tables.
//!
//! Rows are `(target, pattern, weight, notes)`. Keyword patterns run case-insensitively
//! against the question text; citation patterns run against each citation string with
//! whitespace removed, so they carry their own digit boundaries.

use crate::model::Function::{self, *};

pub(crate) type RuleRow = (Function, &'static str, f64, &'static str);

pub(crate) const KEYWORD_RULES: &[RuleRow] = &[
    (MaintenancePlanning, r"\bprogram\b", 1.5, "Program management"),
    (MaintenancePlanning, r"\btask\s*card", 2.0, "Task card development"),
    (MaintenancePlanning, r"\bmaintenance\s+program", 2.0, "Maintenance program"),
    (MaintenancePlanning, r"\bscheduled\s+maintenance", 1.8, "Scheduled maintenance"),
    (MaintenancePlanning, r"\binterval", 1.2, "Maintenance intervals"),
    (MaintenancePlanning, r"\bCMP\b", 2.0, "Continuous Maintenance Program"),
    (MaintenancePlanning, r"\bCAMP\b", 2.0, "Continuous Airworthiness Maintenance Program"),
    (MaintenancePlanning, r"\bplanning", 1.0, "Planning activities"),
    (MaintenancePlanning, r"\bworkscope", 1.5, "Work scope definition"),
    (MaintenancePlanning, r"\bwork\s*package", 1.5, "Work package development"),
    (MaintenancePlanning, r"\bAD\s+compliance", 1.5, "Airworthiness Directive compliance"),
    (MaintenancePlanning, r"\bairworthiness\s+directive", 1.5, "Airworthiness Directives"),
    (MaintenancePlanning, r"\bSB\s+evaluation", 1.2, "Service Bulletin evaluation"),
    (MaintenancePlanning, r"\bservice\s+bulletin", 1.0, "Service Bulletins"),
    (MaintenancePlanning, r"\breliability\s+program", 1.5, "Reliability program"),
    (MaintenanceOperationsCenter, r"\bcontrol\b", 1.2, "Control activities"),
    (MaintenanceOperationsCenter, r"\bdispatch", 2.0, "Dispatch operations"),
    (MaintenanceOperationsCenter, r"\bMEL\b", 2.0, "Minimum Equipment List"),
    (MaintenanceOperationsCenter, r"\bminimum\s+equipment\s+list", 2.0, "MEL management"),
    (MaintenanceOperationsCenter, r"\bCDL\b", 1.8, "Configuration Deviation List"),
    (MaintenanceOperationsCenter, r"\bNEF\b", 1.5, "Non-Essential Furnishings"),
    (MaintenanceOperationsCenter, r"\bdefer", 1.5, "Deferral management"),
    (MaintenanceOperationsCenter, r"\boperations\s+center", 2.0, "Operations center"),
    (MaintenanceOperationsCenter, r"\brelease\s+to\s+service", 1.5, "Release to service"),
    (MaintenanceOperationsCenter, r"\baircraft\s+status", 1.2, "Aircraft status monitoring"),
    (MaintenanceOperationsCenter, r"\bscheduling", 1.0, "Scheduling activities"),
    (MaintenanceOperationsCenter, r"\bcoordination", 0.8, "Coordination activities"),
    (DirectorOfMaintenance, r"\bdirector", 1.5, "Director responsibilities"),
    (DirectorOfMaintenance, r"\bmanagement\s+responsibility", 2.0, "Management responsibility"),
    (DirectorOfMaintenance, r"\borganization", 1.0, "Organization structure"),
    (DirectorOfMaintenance, r"\bpolicy", 1.2, "Policy development"),
    (DirectorOfMaintenance, r"\bauthority", 1.2, "Authority delegation"),
    (DirectorOfMaintenance, r"\bapproval", 1.0, "Approval authority"),
    (DirectorOfMaintenance, r"\boversight", 1.5, "Oversight responsibility"),
    (DirectorOfMaintenance, r"\baccountable", 1.5, "Accountability"),
    (DirectorOfMaintenance, r"\bduties\s+and\s+responsibilities", 2.0, "Duties and responsibilities"),
    (DirectorOfMaintenance, r"\bmanagement\s+personnel", 1.5, "Management personnel"),
    (AircraftRecords, r"\brecord", 1.5, "Record keeping"),
    (AircraftRecords, r"\bdocument", 1.0, "Documentation"),
    (AircraftRecords, r"\blog\s*book", 2.0, "Logbook management"),
    (AircraftRecords, r"\baircraft\s+log", 2.0, "Aircraft logs"),
    (AircraftRecords, r"\bhistorical\s+record", 2.0, "Historical records"),
    (AircraftRecords, r"\bretention", 1.5, "Record retention"),
    (AircraftRecords, r"\btraceability", 1.5, "Traceability"),
    (AircraftRecords, r"\bpart\s+8110", 1.5, "Part approval records"),
    (AircraftRecords, r"\b8130", 1.8, "FAA Form 8130"),
    (AircraftRecords, r"\btime\s+in\s+service", 1.5, "Time tracking"),
    (AircraftRecords, r"\bcycle", 1.0, "Cycle tracking"),
    (AircraftRecords, r"\bserial\s+number", 1.2, "Serial number tracking"),
    (AircraftRecords, r"\blife\s+limit", 1.5, "Life-limited parts"),
    (Quality, r"\bquality", 2.0, "Quality assurance"),
    (Quality, r"\baudit", 1.8, "Audit activities"),
    (Quality, r"\binspection\s+program", 1.5, "Inspection program"),
    (Quality, r"\brequired\s+inspection", 2.0, "Required Inspection Items"),
    (Quality, r"\bRII\b", 2.5, "Required Inspection Items"),
    (Quality, r"\bcompliance\s+monitoring", 1.5, "Compliance monitoring"),
    (Quality, r"\bcontinuous\s+analysis", 1.5, "Continuous analysis"),
    (Quality, r"\bsurveillance", 1.5, "Surveillance activities"),
    (Quality, r"\bfinding", 1.2, "Audit findings"),
    (Quality, r"\bcorrective\s+action", 1.5, "Corrective actions"),
    (Quality, r"\broot\s+cause", 1.2, "Root cause analysis"),
    (Quality, r"\bnonconformance", 1.5, "Nonconformance"),
    (Quality, r"\bverif", 1.0, "Verification"),
    (Training, r"\btraining", 2.0, "Training programs"),
    (Training, r"\bqualification", 1.8, "Qualification requirements"),
    (Training, r"\bauthoriz", 1.2, "Authorization"),
    (Training, r"\bcertificat", 1.0, "Certification"),
    (Training, r"\bcompetenc", 1.5, "Competency"),
    (Training, r"\bcurriculum", 2.0, "Training curriculum"),
    (Training, r"\binitial\s+training", 2.0, "Initial training"),
    (Training, r"\brecurrent\s+training", 2.0, "Recurrent training"),
    (Training, r"\bOJT\b", 2.0, "On-the-job training"),
    (Training, r"\bon[\s-]*the[\s-]*job", 1.8, "On-the-job training"),
    (Training, r"\bpersonnel\s+requirement", 1.2, "Personnel requirements"),
    (Safety, r"\bsafety\s+management", 2.5, "Safety Management System"),
    (Safety, r"\bSMS\b", 2.5, "SMS"),
    (Safety, r"\bhazard", 2.0, "Hazard identification"),
    (Safety, r"\brisk\s+assessment", 2.0, "Risk assessment"),
    (Safety, r"\brisk\s+management", 2.0, "Risk management"),
    (Safety, r"\bsafety\s+policy", 2.0, "Safety policy"),
    (Safety, r"\bsafety\s+objective", 1.8, "Safety objectives"),
    (Safety, r"\bsafety\s+assurance", 2.0, "Safety assurance"),
    (Safety, r"\bsafety\s+promotion", 1.5, "Safety promotion"),
    (Safety, r"\bincident", 1.2, "Incident reporting"),
    (Safety, r"\baccident", 1.5, "Accident investigation"),
    (Safety, r"\bSDR\b", 1.5, "Service Difficulty Reports"),
    (Safety, r"\bservice\s+difficulty", 1.5, "Service difficulty reporting"),
];

pub(crate) const CITATION_RULES: &[RuleRow] = &[
    (MaintenancePlanning, r"(?:^|\D)121\.367(?:\D|$)", 2.0, "Maintenance program requirements"),
    (MaintenancePlanning, r"(?:^|\D)121\.369(?:\D|$)", 2.0, "Maintenance program content"),
    (MaintenancePlanning, r"(?:^|\D)121\.1109(?:\D|$)", 1.8, "CAMP supplemental provisions"),
    (MaintenancePlanning, r"(?:^|\D)43\.3(?:\D|$)", 1.0, "Persons authorized to perform maintenance"),
    (MaintenancePlanning, r"(?:^|\D)43\.13(?:\D|$)", 1.0, "Performance rules"),
    (MaintenancePlanning, r"(?:^|\D)91\.409(?:\D|$)", 1.5, "Inspection requirements"),
    (MaintenanceOperationsCenter, r"(?:^|\D)121\.379(?:\D|$)", 2.0, "MOC requirements"),
    (MaintenanceOperationsCenter, r"(?:^|\D)121\.628(?:\D|$)", 1.8, "Inoperable instruments/equipment"),
    (MaintenanceOperationsCenter, r"(?:^|\D)91\.213(?:\D|$)", 1.8, "Inoperative instruments"),
    (MaintenanceOperationsCenter, r"(?:^|\D)121\.631(?:\D|$)", 1.5, "Dispatch/flight release"),
    (DirectorOfMaintenance, r"(?:^|\D)121\.363(?:\D|$)", 2.0, "DOM responsibility"),
    (DirectorOfMaintenance, r"(?:^|\D)121\.365(?:\D|$)", 2.0, "Maintenance organization requirements"),
    (DirectorOfMaintenance, r"(?:^|\D)119\.65(?:\D|$)", 1.5, "Management personnel qualifications"),
    (DirectorOfMaintenance, r"(?:^|\D)119\.67(?:\D|$)", 1.5, "Management personnel requirements"),
    (AircraftRecords, r"(?:^|\D)121\.380(?:\D|$)", 2.0, "Maintenance recording requirements"),
    (AircraftRecords, r"(?:^|\D)121\.380a(?:\D|$)", 2.0, "Transfer of records"),
    (AircraftRecords, r"(?:^|\D)43\.9(?:\D|$)", 1.8, "Content of maintenance records"),
    (AircraftRecords, r"(?:^|\D)43\.11(?:\D|$)", 1.8, "Content of inspection records"),
    (AircraftRecords, r"(?:^|\D)43\.12(?:\D|$)", 1.5, "Maintenance records retention"),
    (AircraftRecords, r"(?:^|\D)91\.417(?:\D|$)", 1.5, "Maintenance records"),
    (Quality, r"(?:^|\D)121\.371(?:\D|$)", 2.0, "RII requirements"),
    (Quality, r"(?:^|\D)121\.373(?:\D|$)", 2.0, "RII qualifications"),
    (Quality, r"(?:^|\D)121\.375(?:\D|$)", 1.8, "Continuous analysis and surveillance"),
    (Quality, r"(?:^|\D)145\.211(?:\D|$)", 1.5, "Quality control system"),
    (Quality, r"(?:^|\D)145\.223(?:\D|$)", 1.5, "FAA inspections"),
    (Training, r"(?:^|\D)121\.375(?:\D|$)", 1.0, "Training requirements (shared)"),
    (Training, r"(?:^|\D)121\.377(?:\D|$)", 2.0, "Maintenance personnel training"),
    (Training, r"(?:^|\D)43\.3(?:\D|$)", 1.2, "Maintenance authorization"),
    (Training, r"(?:^|\D)43\.7(?:\D|$)", 1.5, "Persons authorized to approve"),
    (Training, r"(?:^|\D)65\.81(?:\D|$)", 1.5, "Mechanic requirements"),
    (Training, r"(?:^|\D)65\.83(?:\D|$)", 1.5, "Mechanic experience"),
    (Safety, r"(?:^|\D)5\.21(?:\D|$)", 2.5, "Safety policy"),
    (Safety, r"(?:^|\D)5\.23(?:\D|$)", 2.5, "Safety accountability"),
    (Safety, r"(?:^|\D)5\.25(?:\D|$)", 2.0, "Safety hazard identification"),
    (Safety, r"(?:^|\D)5\.51(?:\D|$)", 2.0, "SMS applicability"),
    (Safety, r"(?:^|\D)5\.53(?:\D|$)", 2.0, "SMS components"),
    (Safety, r"(?:^|\D)121\.703(?:\D|$)", 1.5, "Mechanical reliability reports"),
];
