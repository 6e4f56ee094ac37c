use icc_config::{IccConfig, IccState, SharedConfig};
use icc_core::CardAppType;
use icc_core::icc_entities::IccEntity;
use icc_entities::cbs::CbsEntity;
use icc_entities::io::card_image::{CardEntity, CardImage};
use icc_entities::io::icc_io_entity::IccIoEntity;
use icc_entities::sms::SmsEntity;
use icc_entities::stk::StkEntity;
use icc_entities::{IccEntityTrait, MessageRouter};
use icc_saps::SapMsg;

use super::sink::Sink;

/// Creates a default config for testing. It can still be modified as needed
/// before passing it to the ComponentTest constructor
pub fn default_test_config(app_type: CardAppType) -> IccConfig {
    let mut config = IccConfig::new(app_type);
    config.sms.timezone_offset_minutes = Some(0);
    config
}

/// Infrastructure for testing ICC stack components
/// Quick setup of entities, an optional in-memory card and sinks for collecting messages
pub struct ComponentTest {
    pub config: SharedConfig,
    pub router: MessageRouter,
    pub sinks: Vec<IccEntity>,
}

impl ComponentTest {
    pub fn new(config: IccConfig) -> Self {
        let state = IccState::new(config.app_type);
        let shared_config = SharedConfig::from_parts(config, state);
        let router = MessageRouter::new(shared_config.clone());
        Self { config: shared_config, router, sinks: vec![] }
    }

    pub fn get_shared_config(&self) -> SharedConfig {
        self.config.clone()
    }

    pub fn populate_entities(&mut self, components: Vec<IccEntity>, sinks: Vec<IccEntity>) {
        for component in components.iter() {
            match component {
                IccEntity::IccIo => {
                    let io = IccIoEntity::new(self.config.clone());
                    self.register_entity(io);
                }
                IccEntity::Stk => {
                    let stk = StkEntity::new(self.config.clone());
                    self.register_entity(stk);
                }
                IccEntity::Cbs => self.register_entity(CbsEntity::new()),
                IccEntity::Sms => {
                    let sms = SmsEntity::new(self.config.clone());
                    self.register_entity(sms);
                }
                _ => {
                    panic!("Component not implemented: {:?}", component);
                }
            }
        }
        self.create_sinks(sinks);
    }

    /// Answer SIM IO from `image` in place of the radio interface layer
    pub fn insert_card(&mut self, image: CardImage) {
        assert!(self.router.get_entity(IccEntity::Ril).is_none(), "Ril already registered");
        self.register_entity(CardEntity::new(image));
    }

    pub fn card(&mut self) -> &mut CardImage {
        let entity = self.router.get_entity(IccEntity::Ril).expect("no card inserted");
        &mut entity.as_any_mut().downcast_mut::<CardEntity>().expect("Ril is not a card").image
    }

    fn create_sinks(&mut self, sinks: Vec<IccEntity>) {
        for sink in sinks.iter() {
            assert!(!self.sinks.contains(sink), "Sink already exists: {:?}", sink);
            assert!(self.router.get_entity(*sink).is_none(), "Sink already registered as entity: {:?}", sink);

            self.sinks.push(*sink);
            self.register_entity(Sink::new(*sink));
        }
    }

    pub fn register_entity<T: 'static + IccEntityTrait>(&mut self, entity: T) {
        self.router.register_entity(Box::new(entity));
    }

    pub fn submit_message(&mut self, message: SapMsg) {
        self.router.submit_message(message);
    }

    pub fn run_until_idle(&mut self) -> usize {
        self.router.run_until_idle()
    }

    pub fn dump_sinks(&mut self) -> Vec<SapMsg> {
        let mut msgs = vec![];
        for sink in self.sinks.iter() {
            if let Some(component) = self.router.get_entity(*sink) {
                if let Some(sink) = component.as_any_mut().downcast_mut::<Sink>() {
                    let mut sink_msgs = sink.take_msgqueue();
                    msgs.append(&mut sink_msgs);
                }
            }
        }
        msgs
    }
}
