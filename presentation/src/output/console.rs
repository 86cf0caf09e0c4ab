//! Console output formatter for portfolio data

use colored::Colorize;
use estatedesk_application::{SearchHits, Submission};
use estatedesk_domain::{
    Agent, AvailabilityMatrix, Buyer, DocumentRecord, Money, Owner, PaymentPlanTemplate,
    PaymentSchedule, Project, ProjectStructure, PropertyStatus, StatusCounts, StepStatus,
    ValidationErrors,
};

/// Formats backend records and wizard state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn search_hits(hits: &SearchHits) -> String {
        match hits {
            SearchHits::Projects(projects) => Self::projects(projects),
            SearchHits::Owners(owners) => Self::owners(owners),
            SearchHits::Agents(agents) => Self::agents(agents),
            SearchHits::Buyers(buyers) => Self::buyers(buyers),
        }
    }

    pub fn projects(projects: &[Project]) -> String {
        if projects.is_empty() {
            return Self::placeholder("No projects found");
        }
        let mut output = Self::section_header("Projects");
        for project in projects {
            let layout = match (project.has_blocks, project.has_houses) {
                (true, true) => "blocks + houses",
                (true, false) => "blocks",
                (false, true) => "houses",
                (false, false) => "no structure",
            };
            output.push_str(&format!(
                "  {:>5}  {}  {} {}\n",
                format!("#{}", project.id).dimmed(),
                project.name.bold(),
                project.project_type.as_str().cyan(),
                format!("({})", layout).dimmed()
            ));
            if !project.location.is_empty() {
                output.push_str(&format!("         {}\n", project.location));
            }
        }
        output
    }

    pub fn owners(owners: &[Owner]) -> String {
        if owners.is_empty() {
            return Self::placeholder("No owners found");
        }
        let mut output = Self::section_header("Owners");
        for owner in owners {
            output.push_str(&Self::party_line(
                owner.id.get(),
                &owner.name,
                &owner.email,
                &owner.phone,
            ));
        }
        output
    }

    pub fn agents(agents: &[Agent]) -> String {
        if agents.is_empty() {
            return Self::placeholder("No agents found");
        }
        let mut output = Self::section_header("Agents");
        for agent in agents {
            output.push_str(&Self::party_line(
                agent.id.get(),
                &agent.name,
                &agent.email,
                &agent.phone,
            ));
            if let Some(agency) = &agent.agency {
                output.push_str(&format!("         {}\n", agency.dimmed()));
            }
        }
        output
    }

    pub fn buyers(buyers: &[Buyer]) -> String {
        if buyers.is_empty() {
            return Self::placeholder("No buyers found");
        }
        let mut output = Self::section_header("Buyers");
        for buyer in buyers {
            output.push_str(&Self::party_line(
                buyer.id.get(),
                &buyer.name,
                &buyer.email,
                &buyer.phone,
            ));
        }
        output
    }

    /// Tree of blocks → floors → units, then houses
    pub fn structure(project: &Project, structure: &ProjectStructure, currency: &str) -> String {
        let mut output = Self::header(&project.name);
        output.push('\n');

        if structure.blocks.is_empty() && structure.houses.is_empty() {
            output.push_str(&Self::placeholder("This project has no blocks or houses yet"));
            return output;
        }

        if project.has_blocks {
            for block in &structure.blocks {
                output.push_str(&format!("\n{}\n", format!("Block {}", block.name).yellow().bold()));
                for floor in &block.floors {
                    output.push_str(&format!("  {}\n", floor.name.cyan()));
                    if floor.units.is_empty() {
                        output.push_str(&format!("    {}\n", "(no units)".dimmed()));
                    }
                    for unit in &floor.units {
                        output.push_str(&format!(
                            "    {:<10} {:<12} {:>8} {:>16}  {}\n",
                            unit.number,
                            unit.unit_type,
                            Self::size(unit.size),
                            unit.price.format_with_symbol(currency),
                            Self::status(unit.status)
                        ));
                    }
                }
            }
        }

        if project.has_houses && !structure.houses.is_empty() {
            output.push_str(&format!("\n{}\n", "Houses".yellow().bold()));
            for house in &structure.houses {
                output.push_str(&format!(
                    "    {:<10} {:<12} {:>8} {:>16}  {}\n",
                    house.number,
                    house.house_type,
                    Self::size(house.size),
                    house.price.format_with_symbol(currency),
                    Self::status(house.status)
                ));
            }
        }

        output
    }

    /// Grid of status counts per block and floor
    pub fn availability(project: &Project, matrix: &AvailabilityMatrix) -> String {
        let mut output = Self::header(&format!("Availability: {}", project.name));
        output.push('\n');

        if matrix.is_empty() {
            output.push_str(&Self::placeholder("No units or houses to report"));
            return output;
        }

        output.push_str(&format!(
            "\n  {:<12} {:<12} {:>9} {:>7} {:>5} {:>6}\n",
            "Block".bold(),
            "Floor".bold(),
            "Available".bold(),
            "Booked".bold(),
            "Sold".bold(),
            "Taken".bold()
        ));
        output.push_str(&format!("  {}\n", "-".repeat(56)));
        for row in &matrix.rows {
            output.push_str(&Self::counts_row(&row.block, &row.floor, &row.counts));
        }
        if matrix.houses.total() > 0 {
            output.push_str(&Self::counts_row("Houses", "", &matrix.houses));
        }
        output.push_str(&format!("  {}\n", "-".repeat(56)));
        output.push_str(&Self::counts_row("Total", "", &matrix.totals));
        output
    }

    pub fn templates(templates: &[PaymentPlanTemplate]) -> String {
        if templates.is_empty() {
            return Self::placeholder("No payment plan templates");
        }
        let mut output = Self::section_header("Payment plan templates");
        for template in templates {
            output.push_str(&format!(
                "  {:>5}  {:<24} {:>3} x {:<10} {} down\n",
                format!("#{}", template.id).dimmed(),
                template.name.bold(),
                template.installment_count,
                template.frequency.as_str(),
                template.down_payment_percentage
            ));
        }
        output
    }

    pub fn documents(documents: &[DocumentRecord]) -> String {
        if documents.is_empty() {
            return Self::placeholder("No documents");
        }
        let mut output = Self::section_header("Documents");
        for document in documents {
            let status = if document.status.is_final() {
                document.status.as_str().dimmed()
            } else {
                document.status.as_str().green()
            };
            output.push_str(&format!(
                "  {:>5}  {}  {:<12} {:<9} {}\n",
                format!("#{}", document.id).dimmed(),
                document.created_at.format("%Y-%m-%d"),
                document.kind.as_str(),
                status,
                document.title
            ));
        }
        output
    }

    /// One line per wizard step with a completion marker
    pub fn progress(wizard: &str, steps: &[StepStatus]) -> String {
        let mut output = Self::section_header(&format!("{} wizard", wizard));
        for step in steps {
            let marker = if step.complete {
                "v".green()
            } else {
                "x".red()
            };
            let title = if step.current {
                step.title.bold()
            } else {
                step.title.normal()
            };
            output.push_str(&format!("  {} {}. {}\n", marker, step.number, title));
        }
        output
    }

    pub fn field_errors(errors: &ValidationErrors) -> String {
        errors
            .errors()
            .iter()
            .map(|e| format!("  {} {} {}\n", "-".red(), e.field.bold(), e.message))
            .collect()
    }

    /// Payload as it would be sent to the backend
    pub fn submission(submission: &Submission) -> String {
        let body = submission
            .to_json()
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|_| "{}".to_string());
        format!(
            "{}\n{}\n",
            format!("{} → {}", submission.label(), submission.action())
                .cyan()
                .bold(),
            body
        )
    }

    pub fn schedule(schedule: &PaymentSchedule, currency: &str) -> String {
        let mut output = Self::section_header("Payment schedule");
        output.push_str(&format!(
            "  {:<18} {:>16}\n",
            "Price",
            schedule.price.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "  {:<18} {:>16}\n",
            "Down payment",
            schedule.down_payment.format_with_symbol(currency)
        ));
        for installment in &schedule.installments {
            output.push_str(&format!(
                "  {:<18} {:>16}  {}\n",
                format!("Installment {}", installment.number),
                installment.amount.format_with_symbol(currency),
                format!("+{} months", installment.due_after_months).dimmed()
            ));
        }
        output.push_str(&format!(
            "  {:<18} {:>16}\n",
            "Total".bold(),
            schedule.total().format_with_symbol(currency)
        ));
        output
    }

    /// Lease term and the rent it adds up to
    pub fn lease(months: u32, monthly_rent: Money, currency: &str) -> String {
        let total: Money = std::iter::repeat_n(monthly_rent, months as usize).sum();
        let mut output = Self::section_header("Lease");
        output.push_str(&format!("  {:<18} {:>16}\n", "Term", format!("{} months", months)));
        output.push_str(&format!(
            "  {:<18} {:>16}\n",
            "Monthly rent",
            monthly_rent.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "  {:<18} {:>16}\n",
            "Total".bold(),
            total.format_with_symbol(currency)
        ));
        output
    }

    pub fn placeholder(message: &str) -> String {
        format!("{}\n", message.dimmed().italic())
    }

    fn party_line(id: u64, name: &str, email: &str, phone: &str) -> String {
        format!(
            "  {:>5}  {:<24} {:<28} {}\n",
            format!("#{}", id).dimmed(),
            name.bold(),
            email,
            phone.dimmed()
        )
    }

    fn counts_row(block: &str, floor: &str, counts: &StatusCounts) -> String {
        format!(
            "  {:<12} {:<12} {:>9} {:>7} {:>5} {:>5}%\n",
            block,
            floor,
            counts.available.to_string().green(),
            counts.booked.to_string().yellow(),
            counts.sold.to_string().red(),
            counts.occupancy_percent()
        )
    }

    fn size(size: f64) -> String {
        if size > 0.0 {
            format!("{:.0} sqft", size)
        } else {
            String::new()
        }
    }

    fn status(status: PropertyStatus) -> colored::ColoredString {
        match status {
            PropertyStatus::Available => status.as_str().green(),
            PropertyStatus::Booked => status.as_str().yellow(),
            PropertyStatus::Sold => status.as_str().red(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
