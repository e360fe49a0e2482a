//! Account Projection CLI
//!
//! Command-line interface for running growth, withdrawal and comparison
//! calculations against the reference data in data/reference/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use log::warn;
use serde::Serialize;

use account_projection::analysis::{
    calculate_cost_of_waiting, calculate_expense_leakage, calculate_milestones,
    compare_account_growth, compare_employer_contribution, compare_purchasing_power,
    final_balances, AccountComparisonInput, CostOfWaitingInput, EmployerMatchInput,
    ExpenseLeakageInput, InflationComparisonInput, MilestoneInput,
};
use account_projection::assumptions::find_fund;
use account_projection::grants::{check_grant_eligibility, GrantCatalog, IncomeByZip};
use account_projection::projection::{
    AccountProfile, EnhancedOptions, GrowthConfig, GrowthEngine, GrowthResult, LifetimeOptions,
};
use account_projection::withdrawal::{
    calculate_withdrawal, generate_withdrawal_timeline, TimelineRequest, WithdrawalRequest,
    WithdrawalScenario,
};
use account_projection::{Assumptions, FilingStatus, PolicyConstants};

#[derive(Parser, Debug)]
#[command(name = "account_projection", version, about = "Child investment account projections")]
struct Cli {
    /// Directory holding the reference CSV/JSON files
    #[arg(long = "reference", default_value = "data/reference")]
    reference: PathBuf,

    /// Write the detailed rows to this CSV file
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct AccountArgs {
    /// Birth year (defaults to the current year)
    #[arg(long)]
    birth_year: Option<i32>,

    #[arg(long, default_value_t = 100.0)]
    monthly: f64,

    #[arg(long = "return", default_value_t = 0.08)]
    annual_return: f64,

    /// Seed deposit (defaults to the pilot deposit if the birth year qualifies)
    #[arg(long)]
    pilot_deposit: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project the contribution phase to the conversion age
    Growth {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long, default_value_t = 0)]
        start_age: u32,

        /// Index the contribution cap to inflation
        #[arg(long)]
        indexed_cap: bool,

        #[arg(long, default_value_t = 0.0)]
        employer: f64,

        /// Add the supplemental grant to the seed
        #[arg(long)]
        grant: bool,

        /// Use this fund's expense ratio
        #[arg(long)]
        fund: Option<String>,
    },
    /// Project the contribution phase, then continue to retirement
    Lifetime {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long, default_value_t = 0.0)]
        post_contribution: f64,

        #[arg(long)]
        retirement_age: Option<u32>,

        #[arg(long)]
        post_return: Option<f64>,
    },
    /// Compare an early start with a later one
    CostOfWaiting {
        #[command(flatten)]
        account: AccountArgs,

        #[arg(long, default_value_t = 0)]
        early: u32,

        #[arg(long, default_value_t = 5)]
        late: u32,
    },
    /// Ages at which balance milestones are reached
    Milestones {
        #[command(flatten)]
        account: AccountArgs,

        /// Continue past conversion to the retirement age
        #[arg(long)]
        lifetime: bool,
    },
    /// Tax and penalty on withdrawals after conversion
    Withdrawal {
        #[arg(long)]
        balance: f64,

        /// Single withdrawal amount; omit to print the age timeline
        #[arg(long)]
        amount: Option<f64>,

        #[arg(long, default_value_t = 65.0)]
        age: f64,

        #[arg(long, default_value_t = 0.0)]
        other_income: f64,

        #[arg(long, default_value = "single")]
        filing_status: FilingStatus,

        #[arg(long = "return", default_value_t = 0.07)]
        annual_return: f64,

        #[arg(long, default_value_t = 0.1)]
        percentage: f64,
    },
    /// Growth with and without a fund expense ratio
    Leakage {
        #[arg(long, default_value_t = 1_000.0)]
        initial: f64,

        #[arg(long, default_value_t = 1_200.0)]
        annual: f64,

        #[arg(long = "return", default_value_t = 0.08)]
        annual_return: f64,

        #[arg(long, default_value_t = 0.0003)]
        expense_ratio: f64,

        #[arg(long, default_value_t = 18)]
        years: u32,
    },
    /// Savings account versus invested money in real terms
    Inflation {
        #[arg(long, default_value_t = 1_000.0)]
        initial: f64,

        #[arg(long, default_value_t = 18)]
        years: u32,

        #[arg(long, default_value_t = 0.03)]
        inflation: f64,

        #[arg(long, default_value_t = 0.005)]
        savings_apy: f64,

        #[arg(long = "return", default_value_t = 0.08)]
        investment_return: f64,
    },
    /// Growth in each account type side by side
    CompareAccounts {
        #[arg(long)]
        birth_year: Option<i32>,

        #[arg(long, default_value_t = 2_000.0)]
        annual: f64,

        #[arg(long = "return", default_value_t = 0.07)]
        annual_return: f64,

        #[arg(long, default_value_t = 18)]
        years: u32,

        #[arg(long)]
        no_pilot: bool,
    },
    /// Effect of an employer contribution
    Employer {
        #[arg(long, default_value_t = 60_000.0)]
        salary: f64,

        #[arg(long, default_value_t = 2_500.0)]
        employer: f64,

        #[arg(long, default_value_t = 100.0)]
        monthly: f64,

        #[arg(long = "return", default_value_t = 0.07)]
        annual_return: f64,

        #[arg(long, default_value_t = 18)]
        years: u32,
    },
    /// Grant eligibility for a ZIP code
    Grants { zip: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let assumptions = load_assumptions(&cli.reference);
    let constants = &assumptions.constants;
    let output = cli.output.as_deref();

    match cli.command {
        Command::Growth {
            account,
            start_age,
            indexed_cap,
            employer,
            grant,
            fund,
        } => {
            let expense_ratio = match fund {
                Some(ticker) => {
                    find_fund(&assumptions.funds, &ticker)
                        .with_context(|| format!("unknown fund {ticker}"))?
                        .expense_ratio
                }
                None => 0.0,
            };
            let enhanced = indexed_cap || employer > 0.0 || grant || expense_ratio > 0.0;
            let config = GrowthConfig {
                annual_return: account.annual_return,
                start_age,
                end_age: constants.conversion_age,
                enhancements: enhanced.then(|| EnhancedOptions {
                    inflation_indexed_cap: indexed_cap,
                    employer_annual_contribution: employer,
                    supplemental_seed: if grant { constants.supplemental_grant } else { 0.0 },
                    expense_ratio,
                }),
            };
            let profile = profile_from(&account, &assumptions, start_age);
            let result = GrowthEngine::new(constants.clone(), config).project_account(&profile);

            print_growth(&result);
            if let Some(breakdown) = &result.breakdown {
                println!("\nContribution breakdown:");
                println!("  Personal:             ${:.2}", breakdown.total_personal);
                println!("  Employer:             ${:.2}", breakdown.total_employer);
                println!("  Tax-free basis:       ${:.2}", breakdown.tax_free_basis_at_conversion);
                println!("  Taxable at conversion: ${:.2}", breakdown.taxable_at_conversion);
            }
            write_rows(output, &result.snapshots)?;
        }
        Command::Lifetime {
            account,
            post_contribution,
            retirement_age,
            post_return,
        } => {
            let config = GrowthConfig {
                annual_return: account.annual_return,
                start_age: 0,
                end_age: constants.conversion_age,
                enhancements: None,
            };
            let options = LifetimeOptions {
                post_majority_contribution: post_contribution,
                retirement_age,
                post_majority_return: post_return,
            };
            let profile = profile_from(&account, &assumptions, 0);
            let result = GrowthEngine::new(constants.clone(), config).project_lifetime(&profile, &options);

            print_growth(&result);
            if let Some(at_conversion) = result.summary(constants.conversion_age).balance_at_conversion {
                println!("  Balance at {}: ${:.2}", constants.conversion_age, at_conversion);
            }
            write_rows(output, &result.snapshots)?;
        }
        Command::CostOfWaiting { account, early, late } => {
            let input = CostOfWaitingInput {
                start_age_early: early,
                start_age_late: late,
                monthly_contribution: account.monthly,
                annual_return: account.annual_return,
                pilot_deposit: account.seed(constants),
                birth_year: account.birth_year(),
            };
            let result = calculate_cost_of_waiting(constants, &input);

            println!("Start at {:>2}: ${:.2}", early, result.early.final_balance);
            println!("Start at {:>2}: ${:.2}", late, result.late.final_balance);
            println!("Difference:  ${:.2} ({:.2}% lost)", result.difference, result.percent_lost);
        }
        Command::Milestones { account, lifetime } => {
            let input = MilestoneInput {
                monthly_contribution: account.monthly,
                annual_return: account.annual_return,
                pilot_deposit: account.seed(constants),
                birth_year: account.birth_year(),
                lifetime,
            };
            let report = calculate_milestones(constants, &input);

            for milestone in &report.milestones {
                match (milestone.age_reached, milestone.year_reached) {
                    (Some(age), Some(year)) => {
                        println!("{:>6}: age {:>2} ({})", milestone.label, age, year)
                    }
                    _ => println!("{:>6}: not reached", milestone.label),
                }
            }
            write_rows(output, &report.milestones)?;
        }
        Command::Withdrawal {
            balance,
            amount,
            age,
            other_income,
            filing_status,
            annual_return,
            percentage,
        } => {
            let tax_tables = &assumptions.tax_tables;
            let scenarios = match amount {
                Some(withdrawal_amount) => vec![calculate_withdrawal(
                    &WithdrawalRequest {
                        age,
                        balance,
                        withdrawal_amount,
                        other_income,
                        filing_status,
                        tax_tables,
                    },
                    constants,
                )],
                None => generate_withdrawal_timeline(
                    &TimelineRequest {
                        balance_at_conversion: balance,
                        annual_return,
                        other_income,
                        filing_status,
                        tax_tables,
                        withdrawal_percentage: percentage,
                    },
                    constants,
                ),
            };

            print_withdrawals(&scenarios);
            write_rows(output, &scenarios)?;
        }
        Command::Leakage {
            initial,
            annual,
            annual_return,
            expense_ratio,
            years,
        } => {
            let points = calculate_expense_leakage(&ExpenseLeakageInput {
                initial_balance: initial,
                annual_contribution: annual,
                annual_return,
                expense_ratio,
                years,
            });

            println!("{:>4} {:>14} {:>14} {:>12}", "Year", "With fees", "No fees", "Leakage");
            for p in &points {
                println!(
                    "{:>4} {:>14.2} {:>14.2} {:>12.2}",
                    p.year, p.balance_with_fees, p.balance_without_fees, p.cumulative_leakage
                );
            }
            write_rows(output, &points)?;
        }
        Command::Inflation {
            initial,
            years,
            inflation,
            savings_apy,
            investment_return,
        } => {
            let comparison = compare_purchasing_power(&InflationComparisonInput {
                initial_amount: initial,
                years,
                inflation_rate: inflation,
                savings_apy,
                investment_return,
            });

            println!("Savings:    ${:.2} nominal, ${:.2} real", comparison.savings_final_nominal, comparison.savings_final_real);
            println!("Investment: ${:.2} nominal, ${:.2} real", comparison.investment_final_nominal, comparison.investment_final_real);
            println!("Purchasing power lost in savings: ${:.2}", comparison.savings_purchasing_power_lost);
            println!("Real advantage of investing:      ${:.2}", comparison.real_advantage);
            write_rows(output, &comparison.yearly)?;
        }
        Command::CompareAccounts {
            birth_year,
            annual,
            annual_return,
            years,
            no_pilot,
        } => {
            let projections = compare_account_growth(
                constants,
                &AccountComparisonInput {
                    annual_contribution: annual,
                    annual_return,
                    years,
                    birth_year: birth_year.unwrap_or_else(current_year),
                    include_pilot_deposit: !no_pilot,
                },
            );

            for (account_type, balance) in final_balances(&projections) {
                println!("{:<36} ${:>14.2}", account_type.name(), balance);
            }
            write_rows(output, &projections)?;
        }
        Command::Employer {
            salary,
            employer,
            monthly,
            annual_return,
            years,
        } => {
            let result = compare_employer_contribution(
                constants,
                &EmployerMatchInput {
                    salary,
                    employer_annual_contribution: employer,
                    personal_monthly_contribution: monthly,
                    annual_return,
                    years,
                },
            );

            println!("With employer:    ${:.2}", result.final_with_employer);
            println!("Without employer: ${:.2}", result.final_without_employer);
            println!("Difference:       ${:.2}", result.difference);
            println!(
                "Employer pays ${:.2}/yr, ${:.2} excluded from income ({:.2}% of salary)",
                result.capped_employer_contribution,
                result.total_excluded_compensation,
                result.compensation_lift_percent
            );
            write_rows(output, &result.yearly)?;
        }
        Command::Grants { zip } => {
            let catalog = GrantCatalog::from_json_path(cli.reference.join("grants.json"))
                .context("loading grant catalog")?;
            let incomes = IncomeByZip::from_csv_path(cli.reference.join("zip_median_income.csv"))
                .context("loading ZIP median incomes")?;
            let result = check_grant_eligibility(&zip, &incomes, &catalog);

            match result.median_income {
                Some(income) => println!("ZIP {}: median household income ${:.0}", result.zip, income),
                None => println!("ZIP {}: not found", result.zip),
            }
            for g in &result.grants {
                let mark = if g.eligible { "eligible" } else { "not eligible" };
                println!("  {} ({}): {}. {}", g.grant.name, g.grant.amount_label, mark, g.reason);
            }
            println!("Total eligible: ${:.2}", result.total_eligible_amount);
            println!("Source: {}", catalog.data_source);
        }
    }

    Ok(())
}

fn load_assumptions(path: &Path) -> Assumptions {
    match Assumptions::from_csv_path(path) {
        Ok(assumptions) => assumptions,
        Err(e) => {
            warn!("Could not load reference data from {}: {}; using built-in values", path.display(), e);
            Assumptions::builtin()
        }
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl AccountArgs {
    fn birth_year(&self) -> i32 {
        self.birth_year.unwrap_or_else(current_year)
    }

    /// Explicit seed, or the pilot deposit the birth year qualifies for
    fn seed(&self, constants: &PolicyConstants) -> f64 {
        self.pilot_deposit
            .unwrap_or_else(|| constants.pilot_deposit_for(self.birth_year()))
    }
}

fn profile_from(account: &AccountArgs, assumptions: &Assumptions, start_age: u32) -> AccountProfile {
    AccountProfile::flat(
        account.birth_year(),
        account.seed(&assumptions.constants),
        account.monthly,
        start_age,
        assumptions.constants.conversion_age,
    )
}

fn print_growth(result: &GrowthResult) {
    println!(
        "{:>3} {:>5} {:>12} {:>10} {:>10} {:>8} {:>12}",
        "Age", "Year", "Start", "Contrib", "Earnings", "Fees", "End"
    );
    println!("{}", "-".repeat(66));
    for s in &result.snapshots {
        println!(
            "{:>3} {:>5} {:>12.2} {:>10.2} {:>10.2} {:>8.2} {:>12.2}",
            s.age, s.year, s.start_balance, s.contributions, s.earnings, s.expenses, s.end_balance
        );
    }

    println!("\nSummary:");
    println!("  Seed:          ${:.2}", result.seed);
    println!("  Contributions: ${:.2}", result.total_contributions);
    println!("  Earnings:      ${:.2}", result.total_earnings);
    println!("  Expenses:      ${:.2}", result.total_expenses);
    println!("  Final balance: ${:.2}", result.final_balance);
}

fn print_withdrawals(scenarios: &[WithdrawalScenario]) {
    println!(
        "{:>5} {:>12} {:>10} {:>9} {:>9} {:>10} {:>7}",
        "Age", "Balance", "Withdraw", "Tax", "Penalty", "Net", "Rate"
    );
    for s in scenarios {
        println!(
            "{:>5.1} {:>12.2} {:>10.2} {:>9.2} {:>9.2} {:>10.2} {:>6.2}%",
            s.age,
            s.balance,
            s.withdrawal_amount,
            s.federal_tax,
            s.early_withdrawal_penalty,
            s.net_amount,
            s.effective_tax_rate * 100.0
        );
    }
}

/// Serialize rows to CSV when `--output` was given
fn write_rows<T: Serialize>(output: Option<&Path>, rows: &[T]) -> Result<()> {
    let Some(path) = output else {
        return Ok(());
    };

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("\nResults written to: {}", path.display());
    Ok(())
}
