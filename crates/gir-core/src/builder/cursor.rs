use crate::{
    continuation::{Continuation, Parameter},
    decl::DeclRef,
    instructions::{Instruction, Terminator},
    module::GirModule,
    types::{GirType, Ownership},
    values::{ContinuationId, Value},
    IrError, Result,
};

/// Thin cursor over the continuation currently being built.
///
/// The builder borrows the module mutably, so two continuations can never be under construction
/// through two live builders at once.
pub struct IrBuilder<'a> {
    module: &'a mut GirModule,
    position: ContinuationId,
}

impl<'a> IrBuilder<'a> {
    pub fn at(module: &'a mut GirModule, position: ContinuationId) -> Result<Self> {
        module.continuation(position)?;
        Ok(Self { module, position })
    }

    pub fn position(&self) -> ContinuationId {
        self.position
    }

    pub fn goto(&mut self, position: ContinuationId) -> Result<()> {
        self.module.continuation(position)?;
        self.position = position;
        Ok(())
    }

    pub fn module(&self) -> &GirModule {
        self.module
    }

    pub fn current(&self) -> Result<&Continuation> {
        self.module.continuation(self.position)
    }

    pub fn is_terminated(&self) -> Result<bool> {
        Ok(self.current()?.is_terminated())
    }

    /// Adds a fresh, empty continuation to the module without moving the cursor.
    pub fn create_continuation(&mut self, name: impl Into<String>, ty: GirType) -> Result<ContinuationId> {
        self.module.add_continuation(Continuation::new(name, ty))
    }

    pub fn append_parameter(
        &mut self,
        name: impl Into<String>,
        ty: GirType,
        ownership: Ownership,
    ) -> Result<Value> {
        let continuation = self.position;
        let cont = self.open_continuation()?;
        let index = cont.params.len() as u32;
        cont.params.push(Parameter::new(name, ty, ownership));
        Ok(Value::Parameter {
            continuation,
            index,
        })
    }

    pub fn create_data_init(&mut self, constructor: impl Into<String>, args: Vec<Value>) -> Result<Value> {
        self.push_instruction(Instruction::DataInit {
            constructor: constructor.into(),
            args,
        })
    }

    pub fn create_function_ref(&mut self, decl: DeclRef, target: Option<ContinuationId>) -> Result<Value> {
        self.push_instruction(Instruction::FunctionRef { decl, target })
    }

    pub fn create_apply(&mut self, callee: Value, args: Vec<Value>) -> Result<()> {
        self.terminate(Terminator::Apply { callee, args })
    }

    pub fn create_switch_constr(
        &mut self,
        scrutinee: Value,
        cases: Vec<(String, ContinuationId)>,
        default: Option<ContinuationId>,
    ) -> Result<()> {
        self.terminate(Terminator::SwitchConstr {
            scrutinee,
            cases,
            default,
        })
    }

    pub fn create_unreachable(&mut self) -> Result<()> {
        self.terminate(Terminator::Unreachable)
    }

    fn push_instruction(&mut self, inst: Instruction) -> Result<Value> {
        let continuation = self.position;
        let cont = self.open_continuation()?;
        let index = cont.instructions.len() as u32;
        cont.instructions.push(inst);
        Ok(Value::Instruction {
            continuation,
            index,
        })
    }

    fn terminate(&mut self, term: Terminator) -> Result<()> {
        let cont = self.open_continuation()?;
        cont.terminator = Some(term);
        Ok(())
    }

    fn open_continuation(&mut self) -> Result<&mut Continuation> {
        let cont = self.module.continuation_mut(self.position)?;
        if cont.is_terminated() {
            return Err(IrError::AlreadyTerminated(cont.name.clone()));
        }
        Ok(cont)
    }
}
