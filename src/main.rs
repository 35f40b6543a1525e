use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tabled::{Table, Tabled, settings::Style};

use financing_simulator::export::write_schedule_csv;
use financing_simulator::format::{format_currency, parse_currency};
use financing_simulator::{
    CalculationResult, FinancingInput, PeriodUnit, RateBasis, calculate_comparison,
    calculate_price_table, calculate_sac_table, validate,
};

#[derive(Parser)]
#[command(name = "financing_simulator")]
#[command(version, about = "Simulate loan financing under the Price and SAC amortization systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a simulation and print its summary
    Simulate {
        #[command(flatten)]
        loan: LoanArgs,

        /// Amortization system to detail
        #[arg(long, value_enum, default_value = "price")]
        system: System,

        /// Print the full amortization table
        #[arg(long)]
        table: bool,

        /// Emit the result as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Compare Price and SAC side by side
    Compare {
        #[command(flatten)]
        loan: LoanArgs,
    },

    /// Export the amortization schedule as CSV
    Export {
        #[command(flatten)]
        loan: LoanArgs,

        /// Amortization system to export
        #[arg(long, value_enum, default_value = "price")]
        system: System,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

#[derive(Args)]
struct LoanArgs {
    /// Financed amount, plain ("150000.50") or formatted ("R$ 150.000,50")
    #[arg(short, long, value_parser = parse_money)]
    amount: Decimal,

    /// Nominal interest rate in percentage points (e.g. 1.5 for 1.5%)
    #[arg(short, long)]
    rate: Decimal,

    /// Loan term, in months unless --period-unit years
    #[arg(short, long)]
    period: u32,

    /// Up-front payment deducted from the financed amount
    #[arg(short, long, default_value = "0", value_parser = parse_money)]
    down_payment: Decimal,

    /// Whether the rate is an effective monthly or nominal yearly percentage
    #[arg(long, value_enum, default_value = "monthly")]
    rate_basis: RateArg,

    /// Unit the term is expressed in
    #[arg(long, value_enum, default_value = "months")]
    period_unit: PeriodArg,
}

impl LoanArgs {
    fn to_input(&self) -> FinancingInput {
        FinancingInput {
            amount: self.amount,
            rate: self.rate,
            period: self.period,
            down_payment: self.down_payment,
            rate_basis: self.rate_basis.into(),
            period_unit: self.period_unit.into(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RateArg {
    Monthly,
    Yearly,
}

impl From<RateArg> for RateBasis {
    fn from(arg: RateArg) -> Self {
        match arg {
            RateArg::Monthly => RateBasis::Monthly,
            RateArg::Yearly => RateBasis::Yearly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    Months,
    Years,
}

impl From<PeriodArg> for PeriodUnit {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Months => PeriodUnit::Months,
            PeriodArg::Years => PeriodUnit::Years,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum System {
    Price,
    Sac,
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { loan, system, table, json } => {
            simulate(&loan.to_input(), system, table, json)
        }
        Commands::Compare { loan } => compare(&loan.to_input()),
        Commands::Export { loan, system, output } => export(&loan.to_input(), system, &output),
    }
}

/// Accepts plain decimals as well as pt-BR formatted currency.
fn parse_money(value: &str) -> Result<Decimal, String> {
    if let Ok(parsed) = value.parse() {
        return Ok(parsed);
    }
    if value.chars().any(|c| c.is_ascii_digit()) {
        return Ok(parse_currency(value));
    }
    Err(format!("invalid monetary value '{value}'"))
}

fn check_input(input: &FinancingInput) -> anyhow::Result<()> {
    let errors = validate(input);
    if errors.is_valid() {
        return Ok(());
    }

    for (field, message) in errors.iter() {
        eprintln!("invalid {field}: {message}");
    }
    anyhow::bail!("input validation failed")
}

fn simulate(input: &FinancingInput, system: System, table: bool, json: bool) -> anyhow::Result<()> {
    check_input(input)?;

    let result = match system {
        System::Price => calculate_price_table(input)?,
        System::Sac => calculate_sac_table(input)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let label = match system {
        System::Price => "Price (fixed installments)",
        System::Sac => "SAC (first installment shown; payments decline)",
    };
    println!("{label}");
    println!("  Installment:     {}", format_currency(result.monthly_payment));
    println!("  Financed amount: {}", format_currency(result.total_principal));
    println!("  Total interest:  {}", format_currency(result.total_interest));
    println!("  Total to pay:    {}", format_currency(result.total_amount));

    if table {
        println!();
        print_schedule(&result);
    }

    Ok(())
}

#[derive(Tabled)]
struct ScheduleLine {
    #[tabled(rename = "#")]
    period: u32,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

fn print_schedule(result: &CalculationResult) {
    let lines: Vec<ScheduleLine> = result
        .schedule
        .iter()
        .map(|row| ScheduleLine {
            period: row.period,
            payment: format_currency(row.payment),
            principal: format_currency(row.principal),
            interest: format_currency(row.interest),
            balance: format_currency(row.balance),
        })
        .collect();

    let table = Table::new(lines).with(Style::rounded()).to_string();
    println!("{table}");
}

#[derive(Tabled)]
struct ComparisonLine {
    #[tabled(rename = "System")]
    system: &'static str,
    #[tabled(rename = "First payment")]
    first_payment: String,
    #[tabled(rename = "Last payment")]
    last_payment: String,
    #[tabled(rename = "Total interest")]
    total_interest: String,
    #[tabled(rename = "Total to pay")]
    total_amount: String,
}

impl ComparisonLine {
    fn new(system: &'static str, result: &CalculationResult) -> Self {
        let first = result.schedule.first().map(|row| row.payment).unwrap_or_default();
        let last = result.schedule.last().map(|row| row.payment).unwrap_or_default();

        Self {
            system,
            first_payment: format_currency(first),
            last_payment: format_currency(last),
            total_interest: format_currency(result.total_interest),
            total_amount: format_currency(result.total_amount),
        }
    }
}

fn compare(input: &FinancingInput) -> anyhow::Result<()> {
    check_input(input)?;

    let result = calculate_comparison(input)?;
    println!("Financed amount: {}", format_currency(result.principal));

    let lines = vec![
        ComparisonLine::new("Price", &result.price),
        ComparisonLine::new("SAC", &result.sac),
    ];
    let table = Table::new(lines).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

fn export(input: &FinancingInput, system: System, output: &Path) -> anyhow::Result<()> {
    check_input(input)?;

    let result = match system {
        System::Price => calculate_price_table(input)?,
        System::Sac => calculate_sac_table(input)?,
    };

    let file = File::create(output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    write_schedule_csv(file, &result.schedule)?;

    println!("exported {} periods to {}", result.schedule.len(), output.display());
    Ok(())
}
